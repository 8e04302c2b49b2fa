use std::path::Path;

use anyhow::{Context, Result};

use foundry_core::scene::LineCap;
use foundry_core::shape::builtin::IconKind;
use foundry_core::shape::{prepare_icon, LengthPolicy};
use foundry_core::{AppConfig, Scene};

pub fn run(config: &AppConfig, icon: &str) -> Result<()> {
    let mut scene = Scene::new();
    let (id, cap) = match icon.parse::<IconKind>() {
        Ok(kind) => (scene.add_icon_markup(kind.name(), kind.markup())?, kind.line_cap()),
        Err(_) => {
            let id = scene
                .add_icon_file(Path::new(icon))
                .with_context(|| format!("'{}' is neither a built-in icon nor a readable SVG file", icon))?;
            (id, LineCap::default())
        }
    };
    let name = scene.label(id);

    let raw: Vec<(String, String)> = scene
        .icon(id)
        .map(|icon| {
            icon.primitives
                .iter()
                .map(|p| {
                    let length = match p.measure() {
                        Ok(length) => format!("{:.2}", length),
                        Err(e) => format!("({})", e),
                    };
                    (p.shape.tag().to_string(), length)
                })
                .collect()
        })
        .unwrap_or_default();

    let policy = LengthPolicy::from(&config.sequence);
    let prepared = prepare_icon(&mut scene, id, "iconGrad0", cap, &policy);

    println!("{} ({} primitives, {:?} caps)\n", name, raw.len(), cap);
    println!("  {:<4} {:<10} {:>10} {:>10}", "#", "shape", "measured", "dash");
    for (index, ((tag, length), spec)) in raw.iter().zip(&prepared.paths).enumerate() {
        println!("  {:<4} {:<10} {:>10} {:>10.2}", index, tag, length, spec.length);
    }
    let total: f64 = prepared.paths.iter().map(|p| p.length).sum();
    println!("\n  total dash length {:.2}", total);
    Ok(())
}
