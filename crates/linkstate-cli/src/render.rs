//! Text and JSON reports.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::time::Duration;

use linkstate_core::{Distance, NodeId};
use linkstate_routing::{ForwardingTable, Round, ShortestPathTree};
use serde::Serialize;

const RULE_WIDTH: usize = 100;
const STEP_WIDTH: usize = 8;
const CONFIRMED_WIDTH: usize = 25;
const CELL_WIDTH: usize = 8;

/// Everything one run produces, ready to print.
pub struct Report<'a> {
    pub tree: &'a ShortestPathTree,
    pub table: &'a ForwardingTable,
    pub show_steps: bool,
    /// Load + compute + resolve, excluding output.
    pub elapsed: Duration,
}

impl Report<'_> {
    fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Render the step table (if requested), the forwarding table, and timing.
pub fn text(report: &Report<'_>) -> String {
    let mut out = String::new();
    if report.show_steps {
        write_steps(&mut out, report.tree);
    }
    write_forwarding(&mut out, report.table);
    let _ = writeln!(out, "Execution time: {:.4} ms", report.elapsed_ms());
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line.trim_end());
    out.push('\n');
}

fn write_steps(out: &mut String, tree: &ShortestPathTree) {
    let rule = "-".repeat(RULE_WIDTH);

    let rows: Vec<(String, Vec<String>)> = tree
        .steps()
        .rounds()
        .iter()
        .enumerate()
        .map(|(index, round)| {
            let confirmed = tree
                .confirmed_through(index)
                .iter()
                .map(NodeId::to_string)
                .collect::<Vec<_>>()
                .join(",");
            let cells = round.cells().map(|(_, cell)| cell.to_string()).collect();
            (format!("{{{confirmed}}}"), cells)
        })
        .collect();
    let headers: Vec<String> = tree.destinations().map(|dest| dest.to_string()).collect();

    // Columns widen past their defaults so adjacent values stay one space apart.
    let confirmed_width = rows
        .iter()
        .map(|(confirmed, _)| confirmed.len() + 1)
        .fold(CONFIRMED_WIDTH, usize::max);
    let cell_width = rows
        .iter()
        .flat_map(|(_, cells)| cells)
        .chain(&headers)
        .map(|cell| cell.len() + 1)
        .fold(CELL_WIDTH, usize::max);

    push_line(out, &rule);
    let mut header = format!("{:<STEP_WIDTH$}{:<confirmed_width$}", "Step", "N'");
    for dest in &headers {
        let _ = write!(header, "{dest:<cell_width$}");
    }
    push_line(out, &header);
    push_line(out, &rule);

    for (index, (confirmed, cells)) in rows.iter().enumerate() {
        let mut line = format!("{index:<STEP_WIDTH$}{confirmed:<confirmed_width$}");
        for cell in cells {
            let _ = write!(line, "{cell:<cell_width$}");
        }
        push_line(out, &line);
    }

    out.push_str("\n\n");
}

fn write_forwarding(out: &mut String, table: &ForwardingTable) {
    push_line(out, "FORWARDING TABLE:");
    push_line(out, &format!("{:<11}{:<3}{:<10}", "Destination", " | ", "Link"));
    push_line(out, "___________________");
    for entry in table {
        let line = format!(
            "{:<11}{:<3}{:<10}",
            format!("    {}", entry.destination),
            " | ",
            format!("({},{})", entry.source, entry.next_hop)
        );
        push_line(out, &line);
    }
    out.push('\n');
}

#[derive(Serialize)]
struct StepRow<'a> {
    step: usize,
    confirmed: &'a [NodeId],
    #[serde(flatten)]
    round: &'a Round,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: NodeId,
    confirmed: &'a [NodeId],
    distances: &'a BTreeMap<NodeId, Distance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    steps: Option<Vec<StepRow<'a>>>,
    forwarding: &'a ForwardingTable,
    elapsed_ms: f64,
}

/// Render the whole report as pretty-printed JSON.
pub fn json(report: &Report<'_>) -> serde_json::Result<String> {
    let tree = report.tree;
    let steps = report.show_steps.then(|| {
        tree.steps()
            .rounds()
            .iter()
            .enumerate()
            .map(|(step, round)| StepRow {
                step,
                confirmed: tree.confirmed_through(step),
                round,
            })
            .collect()
    });

    serde_json::to_string_pretty(&JsonReport {
        source: tree.source(),
        confirmed: tree.confirmed(),
        distances: tree.distances(),
        steps,
        forwarding: report.table,
        elapsed_ms: report.elapsed_ms(),
    })
}
