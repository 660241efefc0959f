//! Action resolution
//!
//! `ActionResolver` runs one submitted action through the rules in order:
//! aggregate stats, resolve condition-driven advantage, gate on resources
//! and slots, roll, and compute the outcome. Nothing is committed; updated
//! slot tables and resource pools are returned for the caller to persist.

use crate::class::{extra_attacks, ClassResources, ResourceError, ResourceKind};
use crate::condition::{
    auto_fails_save, can_act, has_resistance_all, is_auto_crit, resolve_attack_advantage,
    save_advantage_state, Condition,
};
use crate::config::RulesConfig;
use crate::spell::{
    casting_ability, get_cantrip_dice_count, get_spell_save_dc, SlotError, SpellSlots,
};
use crate::stats::{
    compute_derived_stats, compute_equipment_bonuses, primary_ability_for_class, DerivedStats,
};
use crate::types::{Ability, CharacterSheet, EquippedItem};
use dice_core::{
    make_attack_roll_with, make_saving_throw_with, AdvantageState, AttackRollResult, DiceError,
    DiceExpression, DiceTerm, Roller, SavingThrowResult,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Error refusing an action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("{0} cannot act")]
    CannotAct(String),
    #[error("{0} is not a spellcaster")]
    NotACaster(String),
    #[error(transparent)]
    Dice(#[from] DiceError),
    #[error(transparent)]
    Slot(#[from] SlotError),
    #[error(transparent)]
    Resource(#[from] ResourceError),
}

// ============================================================================
// Inputs
// ============================================================================

/// A participant in an action: sheet, gear and active conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Combatant {
    pub sheet: CharacterSheet,
    #[serde(default)]
    pub equipment: Vec<EquippedItem>,
    /// Unknown condition names are skipped on load
    #[serde(default, deserialize_with = "crate::condition::deserialize_conditions")]
    pub conditions: Vec<Condition>,
    /// Abilities whose saving throws add proficiency
    #[serde(default)]
    pub save_proficiencies: Vec<Ability>,
}

impl Combatant {
    pub fn new(sheet: CharacterSheet) -> Self {
        Combatant {
            sheet,
            equipment: Vec::new(),
            conditions: Vec::new(),
            save_proficiencies: Vec::new(),
        }
    }

    pub fn with_equipment(mut self, item: EquippedItem) -> Self {
        self.equipment.push(item);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn with_save_proficiency(mut self, ability: Ability) -> Self {
        self.save_proficiencies.push(ability);
        self
    }

    /// Stats with equipment applied
    pub fn derived_stats(&self) -> DerivedStats {
        compute_derived_stats(&self.sheet, &compute_equipment_bonuses(&self.equipment))
    }
}

/// A weapon (or unarmed) attack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponAttack {
    /// Damage notation; `None` is an unarmed strike
    pub damage_dice: Option<String>,
    pub is_melee: bool,
    pub distance_ft: u32,
}

impl WeaponAttack {
    pub fn melee(damage_dice: impl Into<String>) -> Self {
        WeaponAttack {
            damage_dice: Some(damage_dice.into()),
            is_melee: true,
            distance_ft: 5,
        }
    }

    pub fn ranged(damage_dice: impl Into<String>, distance_ft: u32) -> Self {
        WeaponAttack {
            damage_dice: Some(damage_dice.into()),
            is_melee: false,
            distance_ft,
        }
    }

    pub fn unarmed() -> Self {
        WeaponAttack {
            damage_dice: None,
            is_melee: true,
            distance_ft: 5,
        }
    }
}

/// How a spell decides whether it lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpellDelivery {
    /// Ranged spell attack against the target's AC
    Attack,
    /// Target saving throw against the caster's spell save DC
    Save {
        ability: Ability,
        half_on_success: bool,
    },
}

/// A spell being cast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCast {
    pub name: String,
    /// Slot level spent; 0 for a cantrip
    pub slot_level: u8,
    /// Damage notation at base level, if the spell deals damage
    pub damage_dice: Option<String>,
    pub delivery: SpellDelivery,
    pub distance_ft: u32,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Damage after criticals, saves and resistance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedDamage {
    pub rolls: Vec<u32>,
    pub modifier: i32,
    pub is_critical: bool,
    pub halved_by_save: bool,
    pub resisted: bool,
    /// Final damage, never negative
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaponAttackOutcome {
    pub advantage: AdvantageState,
    pub attack: AttackRollResult,
    /// `None` on a miss
    pub damage: Option<AppliedDamage>,
    /// Further attacks the class allows this action
    pub extra_attacks: u32,
}

/// How the target fared against a spell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpellResolution {
    Attack(AttackRollResult),
    Save {
        dc: i32,
        /// `None` when the save failed automatically
        save: Option<SavingThrowResult>,
        success: bool,
    },
}

impl SpellResolution {
    /// Whether the spell's full effect lands
    pub fn lands(&self) -> bool {
        match self {
            SpellResolution::Attack(attack) => attack.hits,
            SpellResolution::Save { success, .. } => !success,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellCastOutcome {
    pub resolution: SpellResolution,
    pub damage: Option<AppliedDamage>,
    /// Slot table after paying for the spell
    pub slots: SpellSlots,
}

// ============================================================================
// Resolver
// ============================================================================

/// Composes the rules subsystems for one action at a time
#[derive(Debug, Clone, Copy)]
pub struct ActionResolver<'a> {
    config: &'a RulesConfig,
}

impl<'a> ActionResolver<'a> {
    pub fn new(config: &'a RulesConfig) -> Self {
        ActionResolver { config }
    }

    pub fn config(&self) -> &RulesConfig {
        self.config
    }

    fn expression(&self, notation: &str) -> Result<DiceExpression, ActionError> {
        let expression: DiceExpression = notation.parse()?;
        expression.check_limit(self.config.dice.max_dice)?;
        Ok(expression)
    }

    /// Attack a target with a weapon
    pub fn weapon_attack(
        &self,
        roller: &mut impl Roller,
        attacker: &Combatant,
        target: &Combatant,
        weapon: &WeaponAttack,
    ) -> Result<WeaponAttackOutcome, ActionError> {
        if !can_act(&attacker.conditions) {
            return Err(ActionError::CannotAct(attacker.sheet.name.clone()));
        }
        let expression = match &weapon.damage_dice {
            Some(notation) => self.expression(notation)?,
            None => self.expression(&self.config.combat.unarmed_dice)?,
        };

        let stats = attacker.derived_stats();
        let target_ac = target.derived_stats().effective_ac;
        let class = attacker.sheet.class();
        let ability = primary_ability_for_class(class);
        let within_reach = weapon.distance_ft <= self.config.combat.melee_reach_ft;

        let advantage = resolve_attack_advantage(
            &attacker.conditions,
            &target.conditions,
            weapon.is_melee,
            within_reach,
        );
        let mut attack = make_attack_roll_with(
            roller,
            stats.effective_abilities.get(ability),
            attacker.sheet.proficiency_bonus,
            target_ac,
            advantage,
        );
        if is_auto_crit(&target.conditions, within_reach) {
            attack = attack.force_critical();
        }

        let damage = attack.hits.then(|| {
            let rolled = if attack.is_critical {
                expression.roll_critical_with(roller)
            } else {
                expression.roll_with(roller)
            };
            let modifier = rolled
                .modifier
                .saturating_add(stats.modifier(ability))
                .saturating_add(stats.damage_bonus);
            let base = rolled
                .rolls
                .iter()
                .fold(0i32, |acc, r| acc.saturating_add(*r as i32))
                .saturating_add(modifier)
                .max(0);
            finish_damage(rolled.rolls, modifier, attack.is_critical, base, false, target)
        });

        let extra_attacks = class
            .map(|c| extra_attacks(c, attacker.sheet.level))
            .unwrap_or(0);

        debug!(
            attacker = %attacker.sheet.name,
            target = %target.sheet.name,
            roll = attack.roll,
            hits = attack.hits,
            critical = attack.is_critical,
            damage = damage.as_ref().map(|d| d.total).unwrap_or(0),
            "weapon attack resolved"
        );

        Ok(WeaponAttackOutcome {
            advantage,
            attack,
            damage,
            extra_attacks,
        })
    }

    /// Cast a spell at a target, paying from `slots`
    pub fn cast_spell(
        &self,
        roller: &mut impl Roller,
        caster: &Combatant,
        target: &Combatant,
        spell: &SpellCast,
        slots: &SpellSlots,
    ) -> Result<SpellCastOutcome, ActionError> {
        if !can_act(&caster.conditions) {
            return Err(ActionError::CannotAct(caster.sheet.name.clone()));
        }
        let ability = caster
            .sheet
            .class()
            .and_then(casting_ability)
            .ok_or_else(|| ActionError::NotACaster(caster.sheet.name.clone()))?;

        let slots = if spell.slot_level == 0 {
            slots.clone()
        } else {
            slots.consume(spell.slot_level)?
        };

        let expression = match &spell.damage_dice {
            Some(notation) => {
                let mut expression: DiceExpression = notation.parse()?;
                if spell.slot_level == 0 {
                    expression = scale_cantrip(expression, caster.sheet.level);
                }
                expression.check_limit(self.config.dice.max_dice)?;
                Some(expression)
            }
            None => None,
        };

        let stats = caster.derived_stats();
        let casting_score = stats.effective_abilities.get(ability);

        let resolution = match spell.delivery {
            SpellDelivery::Attack => {
                let within_reach = spell.distance_ft <= self.config.combat.melee_reach_ft;
                let advantage = resolve_attack_advantage(
                    &caster.conditions,
                    &target.conditions,
                    false,
                    within_reach,
                );
                let mut attack = make_attack_roll_with(
                    roller,
                    casting_score,
                    caster.sheet.proficiency_bonus,
                    target.derived_stats().effective_ac,
                    advantage,
                );
                if is_auto_crit(&target.conditions, within_reach) {
                    attack = attack.force_critical();
                }
                SpellResolution::Attack(attack)
            }
            SpellDelivery::Save { ability: save_ability, .. } => {
                let dc = get_spell_save_dc(caster.sheet.proficiency_bonus, casting_score);
                if auto_fails_save(&target.conditions, save_ability) {
                    SpellResolution::Save {
                        dc,
                        save: None,
                        success: false,
                    }
                } else {
                    let target_stats = target.derived_stats();
                    let save = make_saving_throw_with(
                        roller,
                        target_stats.effective_abilities.get(save_ability),
                        target.sheet.proficiency_bonus,
                        target.save_proficiencies.contains(&save_ability),
                        dc,
                        save_advantage_state(&target.conditions, save_ability),
                    );
                    SpellResolution::Save {
                        dc,
                        success: save.success,
                        save: Some(save),
                    }
                }
            }
        };

        let half_on_success = matches!(
            spell.delivery,
            SpellDelivery::Save {
                half_on_success: true,
                ..
            }
        );
        let is_critical = matches!(&resolution, SpellResolution::Attack(a) if a.is_critical);

        let damage = expression.and_then(|expression| {
            let halved_by_save = !resolution.lands() && half_on_success;
            if !resolution.lands() && !halved_by_save {
                return None;
            }
            let rolled = if is_critical {
                expression.roll_critical_with(roller)
            } else {
                expression.roll_with(roller)
            };
            let mut base = rolled.total.max(0);
            if halved_by_save {
                base /= 2;
            }
            Some(finish_damage(
                rolled.rolls,
                rolled.modifier,
                is_critical,
                base,
                halved_by_save,
                target,
            ))
        });

        debug!(
            caster = %caster.sheet.name,
            spell = %spell.name,
            slot_level = spell.slot_level,
            lands = resolution.lands(),
            damage = damage.as_ref().map(|d| d.total).unwrap_or(0),
            "spell resolved"
        );

        Ok(SpellCastOutcome {
            resolution,
            damage,
            slots,
        })
    }

    /// Spend one charge of a class resource
    pub fn use_resource(
        &self,
        resources: &ClassResources,
        kind: ResourceKind,
    ) -> Result<ClassResources, ActionError> {
        Ok(resources.consume(kind)?)
    }
}

fn finish_damage(
    rolls: Vec<u32>,
    modifier: i32,
    is_critical: bool,
    base: i32,
    halved_by_save: bool,
    target: &Combatant,
) -> AppliedDamage {
    let resisted = has_resistance_all(&target.conditions);
    let total = if resisted { base / 2 } else { base };
    AppliedDamage {
        rolls,
        modifier,
        is_critical,
        halved_by_save,
        resisted,
        total: total.max(0),
    }
}

/// Multiply every term's dice by the cantrip scaling for a character level
fn scale_cantrip(expression: DiceExpression, character_level: u32) -> DiceExpression {
    let factor = get_cantrip_dice_count(character_level);
    DiceExpression {
        terms: expression
            .terms
            .into_iter()
            .map(|t| DiceTerm {
                count: t.count.saturating_mul(factor),
                sides: t.sides,
            })
            .collect(),
        ..expression
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::initialize_class_resources;
    use crate::spell::initialize_spell_slots;
    use crate::types::AbilityScores;
    use dice_core::ScriptedRoller;

    fn sheet(name: &str, class: &str, level: u32, abilities: AbilityScores) -> CharacterSheet {
        CharacterSheet {
            name: name.to_string(),
            class_name: class.to_string(),
            level,
            proficiency_bonus: dice_core::proficiency_bonus_for_level(level),
            abilities,
            ac: 13,
            max_hp: 20,
            speed: 30,
        }
    }

    fn fighter(level: u32) -> Combatant {
        Combatant::new(sheet("Brienne", "fighter", level, AbilityScores::new(16, 12, 14, 10, 10, 10)))
    }

    fn wizard() -> Combatant {
        Combatant::new(sheet("Elminster", "wizard", 5, AbilityScores::new(8, 14, 12, 18, 12, 10)))
    }

    fn goblin() -> Combatant {
        Combatant::new(sheet("Goblin", "monster", 1, AbilityScores::uniform(10)))
    }

    #[test]
    fn test_weapon_hit() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let mut roller = ScriptedRoller::new([12, 6]);

        let outcome = resolver
            .weapon_attack(&mut roller, &fighter(5), &goblin(), &WeaponAttack::melee("1d8"))
            .unwrap();

        // 12 + STR 3 + proficiency 3
        assert_eq!(outcome.attack.total, 18);
        assert!(outcome.attack.hits);
        let damage = outcome.damage.unwrap();
        assert_eq!(damage.rolls, vec![6]);
        assert_eq!(damage.total, 9);
        assert_eq!(outcome.extra_attacks, 1);
    }

    #[test]
    fn test_weapon_miss_has_no_damage() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let mut roller = ScriptedRoller::new([2]);
        let outcome = resolver
            .weapon_attack(&mut roller, &fighter(1), &goblin(), &WeaponAttack::melee("1d8"))
            .unwrap();
        assert!(!outcome.attack.hits);
        assert_eq!(outcome.damage, None);
        assert_eq!(roller.remaining(), 0);
    }

    #[test]
    fn test_paralyzed_target_auto_crit() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let target = goblin().with_condition(Condition::Paralyzed);
        let mut roller = ScriptedRoller::new([4, 10, 3, 5]);

        let outcome = resolver
            .weapon_attack(&mut roller, &fighter(1), &target, &WeaponAttack::melee("1d8"))
            .unwrap();

        assert_eq!(outcome.advantage, AdvantageState::Advantage);
        assert_eq!(outcome.attack.roll, 10);
        assert!(outcome.attack.is_critical);
        let damage = outcome.damage.unwrap();
        assert_eq!(damage.rolls, vec![3, 5]);
        assert_eq!(damage.total, 11);
    }

    #[test]
    fn test_petrified_target_resists_ranged() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let rogue = Combatant::new(sheet("Vex", "rogue", 1, AbilityScores::new(10, 16, 10, 10, 10, 10)));
        let target = goblin().with_condition(Condition::Petrified);
        let mut roller = ScriptedRoller::new([15, 2, 6]);

        let outcome = resolver
            .weapon_attack(&mut roller, &rogue, &target, &WeaponAttack::ranged("1d6", 30))
            .unwrap();

        assert!(outcome.attack.hits);
        assert!(!outcome.attack.is_critical);
        let damage = outcome.damage.unwrap();
        assert!(damage.resisted);
        // (6 + DEX 3) / 2
        assert_eq!(damage.total, 4);
    }

    #[test]
    fn test_incapacitated_attacker_refused() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let attacker = fighter(5).with_condition(Condition::Stunned);
        let err = resolver
            .weapon_attack(&mut ScriptedRoller::default(), &attacker, &goblin(), &WeaponAttack::unarmed())
            .unwrap_err();
        assert_eq!(err, ActionError::CannotAct("Brienne".to_string()));
    }

    #[test]
    fn test_equipment_damage_bonus_and_unarmed_dice() {
        let config = RulesConfig::from_toml_str("[combat]\nunarmed_dice = \"1d6\"\n").unwrap();
        let resolver = ActionResolver::new(&config);
        let attacker =
            fighter(1).with_equipment(EquippedItem::new("Gauntlets").with_special("damageBonus", 2));
        let mut roller = ScriptedRoller::new([15, 6]);

        let outcome = resolver
            .weapon_attack(&mut roller, &attacker, &goblin(), &WeaponAttack::unarmed())
            .unwrap();
        assert_eq!(outcome.damage.unwrap().total, 6 + 3 + 2);
    }

    #[test]
    fn test_ranged_attack_within_5ft_of_paralyzed_crits() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let rogue = Combatant::new(sheet("Vex", "rogue", 1, AbilityScores::new(10, 16, 10, 10, 10, 10)));
        let target = goblin().with_condition(Condition::Paralyzed);
        let mut roller = ScriptedRoller::new([4, 10, 3, 5]);

        let outcome = resolver
            .weapon_attack(&mut roller, &rogue, &target, &WeaponAttack::ranged("1d6", 5))
            .unwrap();

        assert!(outcome.attack.is_critical);
        let damage = outcome.damage.unwrap();
        assert_eq!(damage.rolls, vec![3, 5]);
        assert_eq!(damage.total, 11);
    }

    #[test]
    fn test_natural_19_is_not_critical_at_any_level() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let mut roller = ScriptedRoller::new([19, 4]);
        let outcome = resolver
            .weapon_attack(&mut roller, &fighter(15), &goblin(), &WeaponAttack::melee("1d8"))
            .unwrap();
        assert!(outcome.attack.hits);
        assert!(!outcome.attack.is_critical);
        let damage = outcome.damage.unwrap();
        assert_eq!(damage.rolls, vec![4]);
        assert_eq!(damage.total, 7);
    }

    #[test]
    fn test_combatant_skips_unknown_conditions() {
        let json = r#"{
            "sheet": {"name": "Goblin", "class": "monster", "level": 1,
                      "proficiencyBonus": 2, "abilities": {"strength": 10, "dexterity": 10,
                      "constitution": 10, "intelligence": 10, "wisdom": 10, "charisma": 10},
                      "ac": 13, "maxHp": 7, "speed": 30},
            "conditions": ["exhaustion", "prone", "hasted"]
        }"#;
        let combatant: Combatant = serde_json::from_str(json).unwrap();
        assert_eq!(combatant.conditions, vec![Condition::Prone]);

        let round_trip: Combatant =
            serde_json::from_str(&serde_json::to_string(&combatant).unwrap()).unwrap();
        assert_eq!(round_trip, combatant);
    }

    #[test]
    fn test_seeded_attacks_reproducible() {
        use rand::SeedableRng;
        use rand_chacha::ChaCha8Rng;

        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let run = |seed: u64| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            resolver
                .weapon_attack(&mut rng, &fighter(11), &goblin(), &WeaponAttack::melee("2d6"))
                .unwrap()
        };
        assert_eq!(run(42), run(42));
        assert_eq!(run(7).extra_attacks, 2);
    }

    #[test]
    fn test_invalid_weapon_dice() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let err = resolver
            .weapon_attack(&mut ScriptedRoller::default(), &fighter(1), &goblin(), &WeaponAttack::melee("1d0"))
            .unwrap_err();
        assert!(matches!(err, ActionError::Dice(_)));

        let err = resolver
            .weapon_attack(&mut ScriptedRoller::default(), &fighter(1), &goblin(), &WeaponAttack::melee("500d6"))
            .unwrap_err();
        assert!(matches!(err, ActionError::Dice(DiceError::TooManyDice { .. })));
    }

    fn fire_bolt() -> SpellCast {
        SpellCast {
            name: "Fire Bolt".to_string(),
            slot_level: 0,
            damage_dice: Some("1d10 fire".to_string()),
            delivery: SpellDelivery::Attack,
            distance_ft: 60,
        }
    }

    fn fireball() -> SpellCast {
        SpellCast {
            name: "Fireball".to_string(),
            slot_level: 3,
            damage_dice: Some("8d6 fire".to_string()),
            delivery: SpellDelivery::Save {
                ability: Ability::Dexterity,
                half_on_success: true,
            },
            distance_ft: 150,
        }
    }

    #[test]
    fn test_cantrip_scales_and_costs_nothing() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let slots = initialize_spell_slots("wizard", 5);
        let mut roller = ScriptedRoller::new([14, 4, 7]);

        let outcome = resolver
            .cast_spell(&mut roller, &wizard(), &goblin(), &fire_bolt(), &slots)
            .unwrap();

        assert!(outcome.resolution.lands());
        let damage = outcome.damage.unwrap();
        assert_eq!(damage.rolls, vec![4, 7]);
        assert_eq!(damage.total, 11);
        assert_eq!(outcome.slots, slots);
    }

    #[test]
    fn test_spell_attack_within_5ft_of_paralyzed_crits() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let slots = initialize_spell_slots("wizard", 5);
        let target = goblin().with_condition(Condition::Paralyzed);
        let spell = SpellCast {
            distance_ft: 5,
            ..fire_bolt()
        };
        let mut roller = ScriptedRoller::new([4, 12, 1, 2, 3, 4]);

        let outcome = resolver
            .cast_spell(&mut roller, &wizard(), &target, &spell, &slots)
            .unwrap();

        assert!(matches!(&outcome.resolution, SpellResolution::Attack(a) if a.is_critical));
        // Two cantrip dice at level 5, doubled
        let damage = outcome.damage.unwrap();
        assert_eq!(damage.rolls, vec![1, 2, 3, 4]);
        assert_eq!(damage.total, 10);
    }

    #[test]
    fn test_save_spell_half_on_success() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let slots = initialize_spell_slots("wizard", 5);
        let mut roller = ScriptedRoller::new([15, 3, 3, 3, 3, 3, 3, 3, 3]);

        let outcome = resolver
            .cast_spell(&mut roller, &wizard(), &goblin(), &fireball(), &slots)
            .unwrap();

        match &outcome.resolution {
            SpellResolution::Save { dc, success, save } => {
                // 8 + proficiency 3 + INT 4
                assert_eq!(*dc, 15);
                assert!(*success);
                assert!(save.is_some());
            }
            other => panic!("unexpected resolution {:?}", other),
        }
        let damage = outcome.damage.unwrap();
        assert!(damage.halved_by_save);
        assert_eq!(damage.total, 12);
        assert_eq!(outcome.slots.get(3).unwrap().used, 1);
        assert_eq!(slots.get(3).unwrap().used, 0);
    }

    #[test]
    fn test_stunned_target_fails_dex_save() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let slots = initialize_spell_slots("wizard", 5);
        let target = goblin().with_condition(Condition::Stunned);
        let mut roller = ScriptedRoller::new([1; 8]);

        let outcome = resolver
            .cast_spell(&mut roller, &wizard(), &target, &fireball(), &slots)
            .unwrap();
        assert!(matches!(
            outcome.resolution,
            SpellResolution::Save { save: None, success: false, .. }
        ));
        assert_eq!(outcome.damage.unwrap().total, 8);
    }

    #[test]
    fn test_spell_refusals() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let mut roller = ScriptedRoller::default();

        let err = resolver
            .cast_spell(&mut roller, &fighter(5), &goblin(), &fire_bolt(), &SpellSlots::new())
            .unwrap_err();
        assert_eq!(err, ActionError::NotACaster("Brienne".to_string()));

        let low_level = initialize_spell_slots("wizard", 1);
        let err = resolver
            .cast_spell(&mut roller, &wizard(), &goblin(), &fireball(), &low_level)
            .unwrap_err();
        assert_eq!(err, ActionError::Slot(SlotError::NoSlotsAtLevel(3)));

        let frozen = wizard().with_condition(Condition::Paralyzed);
        let err = resolver
            .cast_spell(&mut roller, &frozen, &goblin(), &fire_bolt(), &low_level)
            .unwrap_err();
        assert!(matches!(err, ActionError::CannotAct(_)));
    }

    #[test]
    fn test_use_resource() {
        let config = RulesConfig::default();
        let resolver = ActionResolver::new(&config);
        let pools = initialize_class_resources("fighter", 2);

        let pools = resolver.use_resource(&pools, ResourceKind::ActionSurge).unwrap();
        assert!(pools.get(ResourceKind::ActionSurge).unwrap().is_empty());
        assert_eq!(
            resolver.use_resource(&pools, ResourceKind::ActionSurge),
            Err(ActionError::Resource(ResourceError::Exhausted(ResourceKind::ActionSurge)))
        );
    }
}
