//! Headless countdown that cycles through every transition style.
//!
//! Run with `RUST_LOG=segue=debug cargo run --example countdown` to see the
//! engine's trace output alongside the printed frames.

use segue::host::{SurfaceId, VirtualHost};
use segue::{LabelBuilder, LabelConfig, TransitionStyle};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

const FRAME: Duration = Duration::from_millis(50);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = LabelConfig::from_json_str(r#"{ "style": "flipVertical", "text": "10" }"#)?;
    let host = VirtualHost::new();
    let clock = host.clock();
    let label = LabelBuilder::new().config(&config).build(host)?;

    for (step, style) in TransitionStyle::ALL.iter().copied().enumerate() {
        label.set_style(style);
        let value = 9 - step as i32;
        label.set_text(value.to_string());

        println!("{:<16} -> {}", style.display_title(), value);
        while !label.status().is_idle() {
            clock.advance(FRAME);
            let (primary, ghost) = label.with_host(|h| {
                (
                    h.surface(SurfaceId::Primary).clone(),
                    h.surface(SurfaceId::Ghost).clone(),
                )
            });
            println!(
                "  t={:>6.3}s  primary={:>3} opacity={:.2}  ghost={:>3}{}",
                clock.now().as_secs_f64(),
                primary.text,
                primary.appearance.opacity,
                ghost.text,
                if ghost.hidden { " (hidden)" } else { "" },
            );
        }
    }

    // Everything at once: queued and drained in order.
    label.set_style(TransitionStyle::Bounce);
    for n in (0..3).rev() {
        label.set_text(format!("{n}"));
    }
    clock.advance(Duration::from_secs(2));

    let checkpoint = label.checkpoint();
    println!("\nfinal: {}", label.text());
    println!("path:  {}", label.history().get_path().join(" "));
    println!("checkpoint {} ({} bytes)", checkpoint.id, checkpoint.to_bytes()?.len());
    Ok(())
}
