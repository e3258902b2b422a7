//! Shape of the models generated by `#[derive(EnumKind)]` and `#[derive(Entity)]`.

use enumhook::{
    ENUM_ATTRIBUTE, Entity, EnumKind,
    error::InvalidValueError,
    traits::{Entity as _, EntityKind, EnumKind as _, Path},
    value::{MemberValue, Scalar, Value},
};

#[derive(Clone, Copy, Debug, EnumKind, Eq, PartialEq)]
enum Status {
    #[value = "A"]
    Active,
    #[value = "C"]
    Closed,
}

#[derive(Clone, Copy, Debug, EnumKind, Eq, PartialEq)]
#[enum_kind(path = "billing::Sign")]
enum Sign {
    #[value(-1)]
    Minus,
    #[value = 0]
    Zero,
    #[value = 1]
    Plus,
}

#[derive(Debug, Default, Entity)]
#[entity(path = "billing::Ledger")]
struct Ledger {
    amount: Value,
    #[field(enum_type = "Sign")]
    sign: Value,
    #[field(skip)]
    cached_total: Option<i64>,
}

#[test]
fn enum_model_follows_declaration_order() {
    let model = Status::MODEL;

    assert_eq!(Status::PATH, "derive::Status");
    assert_eq!(model.path, Status::PATH);
    assert_eq!(model.members.len(), 2);
    assert_eq!(model.members[0].name, "Active");
    assert_eq!(model.members[1].value, MemberValue::Text("C"));
    assert!(model.validate().is_ok());

    assert_eq!(Status::Closed.index(), 1);
    assert_eq!(Status::from_index(0), Some(Status::Active));
    assert_eq!(Status::from_index(2), None);
}

#[test]
fn typed_lookup_round_trips_through_members() {
    assert_eq!(Sign::lookup(&Scalar::Int(-1)), Ok(Sign::Minus));
    assert_eq!(Sign::Plus.value(), MemberValue::Int(1));
    assert_eq!(
        Sign::lookup(&Scalar::Int(7)),
        Err(InvalidValueError::new("billing::Sign", Scalar::Int(7)))
    );

    let member = Sign::Zero.to_enum_ref();
    assert_eq!(member.name(), "Zero");
    assert_eq!(member.path(), Sign::PATH);
    assert_eq!(Sign::try_from_enum_ref(member), Some(Sign::Zero));
    assert_eq!(Status::try_from_enum_ref(member), None);
}

#[test]
fn members_are_canonical() {
    let looked_up = Status::MODEL.lookup(&Scalar::from("A")).unwrap();

    assert_eq!(looked_up, Status::Active.to_enum_ref());
    assert_eq!(Value::from(Status::Active), Value::Enum(looked_up));
    assert_ne!(Value::from(Status::Active), Value::from("A"));
}

#[test]
fn entity_model_lists_mapped_fields_only() {
    let model = Ledger::MODEL;

    assert_eq!(model.path, "billing::Ledger");
    assert_eq!(model.field_names().collect::<Vec<_>>(), vec!["amount", "sign"]);
    assert_eq!(model.field("sign").and_then(|f| f.attribute(ENUM_ATTRIBUTE)), Some("Sign"));
    assert!(model.field("amount").is_some_and(|f| f.attributes.is_empty()));
    assert!(model.field("cached_total").is_none());
}

#[test]
fn entity_field_access_is_by_name() {
    let mut ledger = Ledger {
        amount: Value::Int(40),
        sign: Value::Int(1),
        cached_total: Some(40),
    };

    assert_eq!(ledger.field("amount"), Some(&Value::Int(40)));
    assert_eq!(ledger.field("cached_total"), None);

    if let Some(slot) = ledger.field_mut("sign") {
        *slot = Sign::Plus.into();
    }
    assert_eq!(Sign::try_from_value(&ledger.sign), Some(Sign::Plus));
    assert_eq!(ledger.model().path, Ledger::PATH);
    assert_eq!(ledger.cached_total, Some(40));
}
