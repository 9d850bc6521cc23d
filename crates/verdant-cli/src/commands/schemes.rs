use verdant_core::scoring::weights::{available_schemes, scheme_weights, WeightSlot};

use crate::error::Result;

pub fn list() -> Result<()> {
    println!("Available weight schemes:\n");
    for slot in WeightSlot::ALL {
        println!("  {} (default: {})", slot, slot.default_scheme());
        for name in available_schemes(slot) {
            let scheme = scheme_weights(slot, name)?;
            let weights: Vec<String> = scheme
                .weights
                .iter()
                .map(|(k, w)| format!("{}={}", k, w))
                .collect();
            println!("    {:<22} {}", name, weights.join("  "));
        }
        println!();
    }
    println!("Any slot may also be set to \"custom\" with a vector under custom_weights.");
    Ok(())
}

pub fn show(slot: &str, name: &str) -> Result<()> {
    let slot: WeightSlot = slot.parse()?;
    let scheme = scheme_weights(slot, name)?;

    println!("{} {} scheme\n", scheme.name, slot);
    for key in slot.keys() {
        let weight = scheme.weights.get(*key).copied().unwrap_or_default();
        println!("  {:<12} {}", key, weight);
    }
    Ok(())
}
