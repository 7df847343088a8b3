//! Integration tests for the JSON circuit configuration layer.

use rusty_circuit::{ChipElement, CircuitError, ElementFactory, NoTranslation};

const DECADE: &str = r#"
{
  "name": "decade",
  "description": "single decade counter",
  "elements": {
    "CTR": {
      "element_type": "sync_counter",
      "properties": {"bits": 4, "modulus": 10}
    }
  }
}
"#;

const CASCADE: &str = r#"
{
  "name": "cascade",
  "elements": {
    "A": {"element_type": "sync_counter", "properties": {"bits": 2}},
    "B": {"element_type": "sync_counter", "properties": {"bits": 2}}
  },
  "wires": [
    {"from": {"element": "A", "pin": 4}, "to": {"element": "B", "pin": 4}},
    {"from": {"element": "A", "pin": 7}, "to": {"element": "B", "pin": 9}}
  ]
}
"#;

#[test]
fn test_build_decade_counter() {
    let factory = ElementFactory::new();
    let circuit = factory.build_from_json(DECADE).unwrap();

    let ctr = circuit.id_of("CTR").unwrap();
    assert_eq!(circuit.element_count(), 1);
    assert_eq!(circuit.element(ctr).post_count(), 14);
    assert_eq!(circuit.voltage_source_count(), 5);
    assert_eq!(
        circuit.element(ctr).chip_name(&NoTranslation),
        "Counter (mod 10)"
    );
}

#[test]
fn test_built_counter_counts_mod_10() {
    let factory = ElementFactory::new();
    let mut circuit = factory.build_from_json(DECADE).unwrap();
    let ctr = circuit.id_of("CTR").unwrap();

    let clk = 8;
    for pin in [9, 10, 12, 13] {
        circuit.set_pin(ctr, pin, true).unwrap();
    }
    circuit.step();

    for edge in 1..=12u64 {
        circuit.set_pin(ctr, clk, true).unwrap();
        circuit.step();
        circuit.set_pin(ctr, clk, false).unwrap();
        circuit.step();

        let mut value = 0u64;
        for bit in 0..4 {
            if circuit.read_pin(ctr, bit).unwrap() {
                value |= 1 << bit;
            }
        }
        assert_eq!(value, edge % 10, "value after edge {}", edge);
    }
}

#[test]
fn test_wires_tie_pins_to_one_net() {
    let factory = ElementFactory::new();
    let mut circuit = factory.build_from_json(CASCADE).unwrap();

    let a = circuit.id_of("A").unwrap();
    let b = circuit.id_of("B").unwrap();
    assert_eq!(
        circuit.node_of(a, 4).unwrap(),
        circuit.node_of(b, 4).unwrap()
    );

    circuit.set_pin(a, 7, true).unwrap();
    assert!(circuit.read_pin(b, 9).unwrap());
}

#[test]
fn test_unknown_element_type_is_error() {
    let factory = ElementFactory::new();
    let json = r#"{"name": "x", "elements": {"E": {"element_type": "nand"}}}"#;
    assert!(matches!(
        factory.build_from_json(json),
        Err(CircuitError::UnknownElementType(_))
    ));
}

#[test]
fn test_wire_to_unknown_element_is_error() {
    let factory = ElementFactory::new();
    let json = r#"
    {
      "name": "x",
      "elements": {"A": {"element_type": "sync_counter"}},
      "wires": [{"from": {"element": "A", "pin": 0},
                 "to": {"element": "GHOST", "pin": 0}}]
    }
    "#;
    assert!(matches!(
        factory.build_from_json(json),
        Err(CircuitError::UnknownElement(_))
    ));
}

#[test]
fn test_wire_to_bad_pin_is_error() {
    let factory = ElementFactory::new();
    let json = r#"
    {
      "name": "x",
      "elements": {"A": {"element_type": "sync_counter"}},
      "wires": [{"from": {"element": "A", "pin": 0},
                 "to": {"element": "A", "pin": 99}}]
    }
    "#;
    assert!(matches!(
        factory.build_from_json(json),
        Err(CircuitError::PinOutOfRange { .. })
    ));
}

#[test]
fn test_malformed_json_is_error() {
    let factory = ElementFactory::new();
    assert!(matches!(
        factory.build_from_json("{not json"),
        Err(CircuitError::Json(_))
    ));
}

#[test]
fn test_custom_element_registration() {
    let mut factory = ElementFactory::new();
    factory.register("wide_counter", |_config| {
        Ok(Box::new(rusty_circuit::SyncCounter::new(8)))
    });

    let json = r#"{"name": "x", "elements": {"W": {"element_type": "wide_counter"}}}"#;
    let circuit = factory.build_from_json(json).unwrap();
    let w = circuit.id_of("W").unwrap();
    assert_eq!(circuit.element(w).post_count(), 2 * 8 + 6);
}
