//! Tests for event filter matching.

use super::*;
use crate::encounter::{ActorDirectory, ActorInfo, Affiliation, EncounterMetadata};

const SELECTED: ActorId = ActorId(1);
const OTHER_FRIENDLY: ActorId = ActorId(2);
const BOSS: ActorId = ActorId(10);
const STRIKE: AbilityId = AbilityId(500);
const BURN: AbilityId = AbilityId(501);

fn directory() -> ActorDirectory {
    let meta = EncounterMetadata {
        encounter_name: None,
        selected_player: SELECTED,
        spec: None,
        duration_millis: 0,
        talents: vec![],
        gear: vec![],
        actors: vec![
            ActorInfo { id: SELECTED, name: "Selected".into(), affiliation: Affiliation::Friendly },
            ActorInfo { id: OTHER_FRIENDLY, name: "Healer".into(), affiliation: Affiliation::Friendly },
            ActorInfo { id: BOSS, name: "Boss".into(), affiliation: Affiliation::Hostile },
        ],
    };
    ActorDirectory::from_metadata(&meta)
}

fn damage_by(source: ActorId) -> Event {
    Event::new(EventTime::from_secs(1), EventKind::Damage)
        .source(source)
        .target(BOSS)
        .ability(STRIKE, "Strike")
        .amount(100)
}

#[test]
fn kind_only_filter_matches_every_event_of_that_kind() {
    let actors = directory();
    let filter = EventFilter::damage();

    assert!(filter.matches(&damage_by(SELECTED), &actors));
    assert!(filter.matches(&damage_by(BOSS), &actors));
    assert!(!filter.matches(&Event::new(EventTime::ZERO, EventKind::Heal), &actors));
}

#[test]
fn qualifier_application_order_does_not_change_the_result() {
    let actors = directory();
    let a = EventFilter::damage().by(ActorQualifier::Selected).ability(STRIKE);
    let b = EventFilter::kind(EventKind::Damage).ability(STRIKE).by(ActorQualifier::Selected);

    for event in [
        damage_by(SELECTED),
        damage_by(OTHER_FRIENDLY),
        damage_by(BOSS),
        damage_by(SELECTED).ability(BURN, "Burn"),
        Event::new(EventTime::ZERO, EventKind::Heal).source(SELECTED).ability(STRIKE, "Strike"),
    ] {
        assert_eq!(
            a.matches(&event, &actors),
            b.matches(&event, &actors),
            "filters with the same qualifiers disagreed on {event:?}"
        );
    }
}

#[test]
fn selected_source_filter_rejects_other_sources() {
    let actors = directory();
    let filter = EventFilter::damage().by(ActorQualifier::Selected);

    assert!(filter.matches(&damage_by(SELECTED), &actors));
    assert!(!filter.matches(&damage_by(OTHER_FRIENDLY), &actors));
    assert!(!filter.matches(&damage_by(BOSS), &actors));
    // No source at all never satisfies a source qualifier.
    let sourceless = Event::new(EventTime::ZERO, EventKind::Damage).target(BOSS);
    assert!(!filter.matches(&sourceless, &actors));
}

#[test]
fn friendly_and_hostile_qualifiers_follow_the_roster() {
    let actors = directory();
    let friendly = EventFilter::damage().by(ActorQualifier::AnyFriendly);
    let hostile = EventFilter::damage().by(ActorQualifier::AnyHostile);

    assert!(friendly.matches(&damage_by(SELECTED), &actors));
    assert!(friendly.matches(&damage_by(OTHER_FRIENDLY), &actors));
    assert!(!friendly.matches(&damage_by(BOSS), &actors));

    assert!(hostile.matches(&damage_by(BOSS), &actors));
    assert!(!hostile.matches(&damage_by(SELECTED), &actors));

    // An actor the roster never mentioned is neither friendly nor hostile.
    assert!(!friendly.matches(&damage_by(ActorId(999)), &actors));
    assert!(!hostile.matches(&damage_by(ActorId(999)), &actors));
}

#[test]
fn ability_set_accepts_any_listed_ability() {
    let actors = directory();
    let filter = EventFilter::damage().abilities([STRIKE, BURN]);

    assert!(filter.matches(&damage_by(SELECTED), &actors));
    assert!(filter.matches(&damage_by(SELECTED).ability(BURN, "Burn"), &actors));
    assert!(!filter.matches(&damage_by(SELECTED).ability(AbilityId(999), "Odd"), &actors));

    // An ability qualifier requires the event to carry an ability at all.
    let no_ability = Event::new(EventTime::ZERO, EventKind::Damage).source(SELECTED);
    assert!(!filter.matches(&no_ability, &actors));
}

#[test]
fn specific_actor_qualifier_matches_unrostered_actors() {
    let actors = directory();
    let pet = ActorId(77);
    let filter = EventFilter::damage().by(ActorQualifier::Specific(pet));

    assert!(filter.matches(&damage_by(pet), &actors));
    assert!(!filter.matches(&damage_by(SELECTED), &actors));
}

#[test]
fn target_qualifier_reads_the_target_side() {
    let actors = directory();
    let filter = EventFilter::heal().to(ActorQualifier::Selected);

    let heal_on_selected =
        Event::new(EventTime::ZERO, EventKind::Heal).source(OTHER_FRIENDLY).target(SELECTED);
    let heal_on_other =
        Event::new(EventTime::ZERO, EventKind::Heal).source(OTHER_FRIENDLY).target(OTHER_FRIENDLY);

    assert!(filter.matches(&heal_on_selected, &actors));
    assert!(!filter.matches(&heal_on_other, &actors));
}
