//! Inspect-and-edit walkthrough.
//!
//! Builds a small document the way a traced page renderer would stamp it,
//! runs the monitor, and drives a full builder session over the bridge:
//! activate, hover, select a grouped row, edit one instance's text, restyle
//! the whole group, and deactivate — printing every event the builder
//! receives.
//!
//! Run with: cargo run --example inspect_session

use anyhow::Result;
use serde_json::json;
use tokio::time::{Duration, sleep};
use url::Url;

use dom_monitor::classify::{
    ATTR_COMPONENT, ATTR_FILE_NAME, ATTR_IDENTITY, ATTR_LINE_NUMBER,
};
use dom_monitor::{
    Document, InputEvent, MonitorConfig, MonitorRuntime, Rect, Viewport, bridge,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dom_monitor=debug")),
        )
        .init();

    // A heading plus a three-row list, stamped with provenance markers.
    let mut document = Document::new(Viewport::new(1280.0, 720.0));
    let root = document.root();

    let heading = document
        .build(root, "h1")
        .attr(ATTR_IDENTITY, "hero-title")
        .attr(ATTR_FILE_NAME, "HeroSection.jsx")
        .attr(ATTR_LINE_NUMBER, "14")
        .attr(ATTR_COMPONENT, "HeroSection")
        .rect(Rect::new(120.0, 80.0, 400.0, 48.0))
        .text("Featured Work")
        .id();

    let mut rows = Vec::new();
    for (index, label) in ["Alpha", "Beta", "Gamma"].iter().enumerate() {
        let row = document
            .build(root, "li")
            .attr(ATTR_IDENTITY, "project-row")
            .attr(ATTR_FILE_NAME, "ProjectsSection.jsx")
            .attr(ATTR_LINE_NUMBER, "31")
            .attr(ATTR_COMPONENT, "ProjectsSection")
            .rect(Rect::new(120.0, 160.0 + 60.0 * index as f64, 400.0, 48.0))
            .text(format!("Project {label}"))
            .id();
        rows.push(row);
    }

    let config = MonitorConfig::new(Url::parse("https://site.example/preview")?);
    let (frame, mut host) = bridge::pair("https://builder.example");
    let runtime = MonitorRuntime::new(config, document, frame);
    let controller = runtime.controller();
    tokio::spawn(runtime.run());

    // 1. Activate debug mode.
    host.post(json!({"type": "DEBUG_COMMAND", "action": "ACTIVATE"}));
    println!("<- {}", host.next_event().await.expect("event")["action"]);

    // 2. Hover the heading, then select the second project row.
    controller.send_input(InputEvent::PointerEnter { target: heading });
    controller.send_input(InputEvent::PointerLeave { target: heading });
    controller.send_input(InputEvent::Click { target: rows[1] });
    let selected = host.next_event().await.expect("event");
    println!(
        "<- {} tag={} group={} editType={}",
        selected["action"],
        selected["element"]["tagName"],
        selected["elementCount"],
        selected["editType"],
    );

    // 3. Rename just the clicked row, then restyle the whole group.
    host.post(json!({
        "type": "DEBUG_COMMAND",
        "action": "APPLY_CHANGES",
        "data": {
            "elementId": "project-row",
            "isMultiElement": true,
            "arrayIndex": 1,
            "textParts": ["Project Beta (renamed)"]
        }
    }));
    host.post(json!({
        "type": "DEBUG_COMMAND",
        "action": "APPLY_CHANGES",
        "data": {
            "elementId": "project-row",
            "isMultiElement": true,
            "className": "highlight"
        }
    }));
    sleep(Duration::from_millis(50)).await;

    controller.with_document(|doc| {
        for &row in &rows {
            println!(
                "   row text={:?} class={:?}",
                doc.text_content(row),
                doc.attribute(row, "class"),
            );
        }
    });

    // 4. Deactivate; the monitor deselects and says goodbye.
    host.post(json!({"type": "DEBUG_COMMAND", "action": "DEACTIVATE"}));
    while let Some(event) = host.next_event().await {
        println!("<- {}", event["action"]);
        if event["action"] == "DEBUG_MODE_DEACTIVATED" {
            break;
        }
    }

    Ok(())
}
