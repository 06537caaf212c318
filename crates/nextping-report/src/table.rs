use nextping_model::ReportRow;
use tabled::builder::Builder;
use tabled::settings::object::{Columns, Rows};
use tabled::settings::{Alignment, Modify, Style};

pub const HEADER: [&str; 4] = ["Test Run", "Probe", "Loss", "Path Information"];

pub fn format_cells(row: &ReportRow) -> [String; 4] {
    [
        row.run.to_string(),
        row.probe.to_string(),
        format!("{:.2}%", row.loss_percent),
        row.path_info.clone(),
    ]
}

/// Renders header and rows as a bordered ASCII table. Multi-line path
/// information spills onto extra physical lines within the same row.
pub fn render_table(rows: &[ReportRow]) -> String {
    let mut builder = Builder::default();
    builder.push_record(HEADER.iter().map(|h| h.to_uppercase()));

    for row in rows {
        let [run, probe, loss, path] = format_cells(row);
        let path = path.trim_end_matches('\n').to_string();
        builder.push_record([run, probe, loss, path]);
    }

    let mut table = builder.build();
    table
        .with(Style::ascii())
        .with(Modify::new(Columns::new(0..3)).with(Alignment::right()))
        .with(Modify::new(Columns::new(3..)).with(Alignment::left()))
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    let mut out = table.to_string();
    out.push('\n');
    out
}
