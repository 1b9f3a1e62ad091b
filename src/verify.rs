//! Post-run verification: every expected tool must be reachable.

use anyhow::{Result, bail};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};

use crate::config::SetupConfig;
use crate::envcfg::EnvOverlay;

/// The full expected-tools list: the configured extras plus everything the
/// enabled steps imply, deduplicated in order.
pub fn expected_tools(config: &SetupConfig) -> Vec<String> {
    let mut tools: Vec<String> = config.expected_tools.clone();
    if config.editor.enabled {
        tools.push("nvim".to_string());
    }
    if config.shell.enabled {
        tools.push("zsh".to_string());
    }
    let t = &config.toolchains;
    if t.rust {
        tools.extend(["rustc".to_string(), "cargo".to_string()]);
    }
    if t.go {
        tools.push("go".to_string());
    }
    if t.node {
        tools.extend(["node".to_string(), "npm".to_string()]);
    }
    if t.bun {
        tools.push("bun".to_string());
    }

    let mut seen = std::collections::HashSet::new();
    tools.retain(|tool| seen.insert(tool.clone()));
    tools
}

/// Split `tools` into (present, missing) with the given probe.
pub fn partition_tools<'a>(
    tools: &'a [String],
    probe: impl Fn(&str) -> bool,
) -> (Vec<&'a str>, Vec<&'a str>) {
    let mut present = Vec::new();
    let mut missing = Vec::new();
    for tool in tools {
        if probe(tool) {
            present.push(tool.as_str());
        } else {
            missing.push(tool.as_str());
        }
    }
    (present, missing)
}

/// Probe everything, print the report table, and fail with the missing list
/// if any tool is absent.
pub fn run(config: &SetupConfig, env: &EnvOverlay) -> Result<()> {
    let tools = expected_tools(config);
    let (present, missing) = partition_tools(&tools, |tool| env.has_tool(tool));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Tool", "Status"]);
    for tool in &present {
        table.add_row(vec![Cell::new(tool), Cell::new("ok").fg(Color::Green)]);
    }
    for tool in &missing {
        table.add_row(vec![Cell::new(tool), Cell::new("missing").fg(Color::Red)]);
    }
    println!("{table}");

    if !missing.is_empty() {
        bail!("missing tools after provisioning: {}", missing.join(", "));
    }
    Ok(())
}
