use rusty_circuit::{ChipElement, ElementFactory, NoTranslation};

const DECADE_COUNTER: &str = r#"
{
  "name": "decade",
  "description": "4-bit decade counter demo",
  "elements": {
    "CTR": {
      "element_type": "sync_counter",
      "properties": {"bits": 4, "modulus": 10}
    }
  }
}
"#;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("Rusty Circuit - Decade Counter Example");
    println!("======================================");

    let factory = ElementFactory::new();
    let mut circuit = match factory.build_from_json(DECADE_COUNTER) {
        Ok(circuit) => circuit,
        Err(e) => {
            eprintln!("Failed to build circuit: {}", e);
            return;
        }
    };

    let ctr = circuit.id_of("CTR").expect("element from config");
    println!(
        "Element: {} ({} pins, {} voltage sources)",
        circuit.element(ctr).chip_name(&NoTranslation),
        circuit.element(ctr).post_count(),
        circuit.voltage_source_count()
    );

    // Published counter pin layout: Q0..Q3, I0..I3, CLK, CLR, EnP,
    // RCO, LOAD, EnT.
    let bits = 4;
    let clk = 2 * bits;
    let clr = clk + 1;
    let enp = clk + 2;
    let rco = clk + 3;
    let load = clk + 4;
    let ent = clk + 5;

    // Enable counting, deassert the active-low controls.
    for pin in [clr, enp, load, ent] {
        circuit.set_pin(ctr, pin, true).expect("valid pin");
    }
    circuit.step();

    println!("\nClocking 12 rising edges:");
    for edge in 1..=12 {
        circuit.set_pin(ctr, clk, true).expect("valid pin");
        circuit.step();
        circuit.set_pin(ctr, clk, false).expect("valid pin");
        circuit.step();

        let mut value = 0u32;
        for bit in 0..bits {
            if circuit.read_pin(ctr, bit).expect("valid pin") {
                value |= 1 << bit;
            }
        }
        let rco_level = circuit.read_pin(ctr, rco).expect("valid pin");
        println!(
            "  edge {:2}: value = {:2}  RCO = {}",
            edge,
            value,
            if rco_level { "1" } else { "0" }
        );
    }

    println!("\nThe counter wraps to 0 after 9 and raises RCO on the last state.");
}
