use anyhow::Result;

use foundry_core::Route;

pub fn run() -> Result<()> {
    println!("Routes ({}):\n", Route::ALL.len());
    for route in Route::ALL {
        println!("  {:<12} {}", route.title(), route.aliases().join(", "));
    }
    Ok(())
}
