use std::collections::BTreeSet;

use anyhow::{bail, Result};
use serde::Serialize;

use foundry_core::{AppConfig, Property};

use crate::headless::Headless;

#[derive(Debug, Serialize)]
struct Value {
    element: String,
    property: Property,
    value: f64,
}

#[derive(Debug, Serialize)]
struct SampleReport {
    progress: f64,
    offset: f64,
    pinned: bool,
    pulse_running: bool,
    values: Vec<Value>,
}

pub fn run(config: &AppConfig, progress: f64, json: bool) -> Result<()> {
    if !(0.0..=1.0).contains(&progress) {
        bail!("Progress must be between 0 and 1, got {}", progress);
    }

    let mut headless = Headless::mount(&config.sequence);
    let sequencer = headless.section.sequencer();
    let (Some(timeline), Some(trigger)) = (sequencer.timeline(), sequencer.trigger()) else {
        bail!("Feature section is static; nothing to sample");
    };

    let offset = trigger.offset_for(progress);
    headless.scroll_to(offset);

    let channels: BTreeSet<_> = timeline
        .tweens()
        .iter()
        .map(|t| (t.target, t.property))
        .collect();
    let scene = &headless.scene;
    let report = SampleReport {
        progress: headless.section.sequencer().progress().unwrap_or(progress),
        offset,
        pinned: trigger.is_pinned(offset),
        pulse_running: headless.section.sequencer().pulse_running(),
        values: channels
            .into_iter()
            .map(|(target, property)| Value {
                element: scene.label(target),
                property,
                value: scene.value(target, property),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Progress {:.3} at scroll {:.1}{}{}\n",
        report.progress,
        report.offset,
        if report.pinned { " (pinned)" } else { "" },
        if report.pulse_running { " (button pulsing)" } else { "" }
    );
    for value in &report.values {
        println!(
            "  {:<20} {:<17} {:>9.3}",
            value.element,
            value.property.to_string(),
            value.value
        );
    }
    Ok(())
}
