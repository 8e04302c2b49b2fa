use anyhow::{bail, Result};
use serde::Serialize;

use foundry_core::{AppConfig, EasingType, Property};

use crate::headless::Headless;

#[derive(Debug, Serialize)]
struct TweenRow {
    element: String,
    property: Property,
    from: f64,
    to: f64,
    start: f64,
    duration: f64,
    easing: EasingType,
}

#[derive(Debug, Serialize)]
struct LabelRow {
    name: String,
    time: f64,
    progress: f64,
}

#[derive(Debug, Serialize)]
struct TimelineReport {
    duration: f64,
    channels: usize,
    scroll_start: f64,
    scroll_end: f64,
    labels: Vec<LabelRow>,
    tweens: Vec<TweenRow>,
}

pub fn run(config: &AppConfig, json: bool) -> Result<()> {
    let headless = Headless::mount(&config.sequence);
    let sequencer = headless.section.sequencer();
    let (Some(timeline), Some(trigger)) = (sequencer.timeline(), sequencer.trigger()) else {
        bail!("Feature section is static; there is no timeline");
    };

    let report = TimelineReport {
        duration: timeline.duration(),
        channels: timeline.channel_count(),
        scroll_start: trigger.start(),
        scroll_end: trigger.end(),
        labels: timeline
            .labels()
            .iter()
            .map(|label| LabelRow {
                name: label.name.clone(),
                time: label.time,
                progress: timeline.progress_of(label.time),
            })
            .collect(),
        tweens: timeline
            .tweens()
            .iter()
            .map(|tween| TweenRow {
                element: headless.scene.label(tween.target),
                property: tween.property,
                from: tween.from,
                to: tween.to,
                start: tween.start,
                duration: tween.duration,
                easing: tween.easing,
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Timeline: {:.2}s scrubbed over scroll {:.0}..{:.0}\n",
        report.duration, report.scroll_start, report.scroll_end
    );
    println!("Labels:");
    for label in &report.labels {
        println!("  {:<12} {:>6.2}s  {:>5.1}%", label.name, label.time, label.progress * 100.0);
    }
    println!("\nTweens ({} over {} channels):", report.tweens.len(), report.channels);
    for tween in &report.tweens {
        println!(
            "  {:>6.2}s +{:<5.2} {:<20} {:<17} {:>8.2} -> {:<8.2} {:?}",
            tween.start,
            tween.duration,
            tween.element,
            tween.property.to_string(),
            tween.from,
            tween.to,
            tween.easing
        );
    }
    Ok(())
}
