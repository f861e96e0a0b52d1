//! Tests for combatant state tracking.

use super::*;

const PLAYER: ActorId = ActorId(1);
const ENEMY: ActorId = ActorId(10);
const SURGE: AbilityId = AbilityId(77);
const TALENT: AbilityId = AbilityId(4000);
const TRINKET: ItemId = ItemId(9000);

fn meta() -> EncounterMetadata {
    EncounterMetadata {
        encounter_name: None,
        selected_player: PLAYER,
        spec: Some(SpecId(3)),
        duration_millis: 0,
        talents: vec![TALENT],
        gear: vec![TRINKET],
        actors: vec![],
    }
}

fn tracker() -> CombatantTracker {
    CombatantTracker::from_metadata(&meta())
}

fn buff_event(kind: EventKind, at_secs: i64) -> Event {
    Event::new(EventTime::from_secs(at_secs), kind).target(PLAYER).ability(SURGE, "Surge")
}

#[test]
fn static_facts_come_from_metadata() {
    let tracker = tracker();
    let player = tracker.selected();

    assert_eq!(player.id(), PLAYER);
    assert_eq!(player.spec(), Some(SpecId(3)));
    assert!(player.has_talent(TALENT));
    assert!(!player.has_talent(AbilityId(4001)));
    assert!(player.has_trinket(TRINKET));
    assert!(!player.has_item(ItemId(9001)));
}

#[test]
fn buff_apply_and_remove_toggle_has_buff() {
    let mut tracker = tracker();
    assert!(!tracker.selected().has_buff(SURGE));

    tracker.advance(&buff_event(EventKind::ApplyBuff, 1));
    assert!(tracker.selected().has_buff(SURGE));

    tracker.advance(&buff_event(EventKind::RemoveBuff, 5));
    assert!(!tracker.selected().has_buff(SURGE));
}

#[test]
fn uptime_is_idempotent_under_duplicate_applies() {
    let mut tracker = tracker();
    // Apply at t=0, apply again at t=2 with no remove in between, remove at
    // t=10: one interval of 10s, not 8 and not 12.
    tracker.advance(&buff_event(EventKind::ApplyBuff, 0));
    tracker.advance(&buff_event(EventKind::ApplyBuff, 2));
    tracker.advance(&buff_event(EventKind::RemoveBuff, 10));

    let uptime = tracker.selected().buff_uptime(SURGE, tracker.position());
    assert_eq!(uptime, 10_000);
}

#[test]
fn refresh_extends_the_open_interval() {
    let mut tracker = tracker();
    tracker.advance(&buff_event(EventKind::ApplyBuff, 0));
    tracker.advance(&buff_event(EventKind::RefreshBuff, 6));
    tracker.advance(&buff_event(EventKind::RemoveBuff, 12));

    assert_eq!(tracker.selected().buff_uptime(SURGE, tracker.position()), 12_000);
}

#[test]
fn uptime_accumulates_across_separate_intervals() {
    let mut tracker = tracker();
    tracker.advance(&buff_event(EventKind::ApplyBuff, 0));
    tracker.advance(&buff_event(EventKind::RemoveBuff, 3));
    tracker.advance(&buff_event(EventKind::ApplyBuff, 10));
    tracker.advance(&buff_event(EventKind::RemoveBuff, 14));

    assert_eq!(tracker.selected().buff_uptime(SURGE, tracker.position()), 7_000);
}

#[test]
fn open_interval_counts_up_to_the_query_position() {
    let mut tracker = tracker();
    tracker.advance(&buff_event(EventKind::ApplyBuff, 2));
    // Mid-pass query at t=9: interval still open, 7s so far.
    tracker.advance(&Event::new(EventTime::from_secs(9), EventKind::Damage).source(PLAYER));

    assert_eq!(tracker.selected().buff_uptime(SURGE, tracker.position()), 7_000);
    assert!(tracker.selected().has_buff(SURGE));
}

#[test]
fn finalize_closes_unclosed_intervals_at_encounter_end() {
    let mut tracker = tracker();
    tracker.advance(&buff_event(EventKind::ApplyBuff, 5));
    tracker.finalize(EventTime::from_secs(20));

    assert_eq!(tracker.selected().buff_uptime(SURGE, tracker.position()), 15_000);
    // Querying later must not grow the closed interval.
    assert_eq!(tracker.selected().buff_uptime(SURGE, EventTime::from_secs(60)), 15_000);
}

#[test]
fn stacks_follow_apply_events() {
    let mut tracker = tracker();
    tracker.advance(&buff_event(EventKind::ApplyBuff, 0));
    assert_eq!(tracker.selected().buff_stacks(SURGE), 1);

    tracker.advance(&buff_event(EventKind::ApplyBuff, 1).stacks(3));
    assert_eq!(tracker.selected().buff_stacks(SURGE), 3);

    tracker.advance(&buff_event(EventKind::RemoveBuff, 2));
    assert_eq!(tracker.selected().buff_stacks(SURGE), 0);
}

#[test]
fn death_closes_open_buffs_on_the_dying_actor() {
    let mut tracker = tracker();
    tracker.advance(&buff_event(EventKind::ApplyBuff, 0));
    tracker.advance(&Event::new(EventTime::from_secs(4), EventKind::Death).target(PLAYER));

    assert!(!tracker.selected().has_buff(SURGE));
    assert_eq!(tracker.selected().buff_uptime(SURGE, EventTime::from_secs(30)), 4_000);
}

#[test]
fn other_actors_are_tracked_lazily() {
    let mut tracker = tracker();
    assert!(tracker.combatant(ENEMY).is_none());

    let debuff = Event::new(EventTime::from_secs(1), EventKind::ApplyDebuff)
        .target(ENEMY)
        .ability(SURGE, "Surge");
    tracker.advance(&debuff);

    let enemy = tracker.combatant(ENEMY).unwrap();
    assert!(enemy.has_buff(SURGE));
    assert!(!tracker.selected().has_buff(SURGE));
}

#[test]
fn debuff_intervals_account_like_buffs() {
    let mut tracker = tracker();
    tracker.advance(
        &Event::new(EventTime::from_secs(2), EventKind::ApplyDebuff)
            .target(ENEMY)
            .ability(SURGE, "Surge"),
    );
    tracker.advance(
        &Event::new(EventTime::from_secs(9), EventKind::RemoveDebuff)
            .target(ENEMY)
            .ability(SURGE, "Surge"),
    );

    let enemy = tracker.combatant(ENEMY).unwrap();
    assert_eq!(enemy.buff_uptime(SURGE, tracker.position()), 7_000);
    assert!(!enemy.has_buff(SURGE));
}
