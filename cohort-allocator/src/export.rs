//! CSV export of generated groups
//!
//! The table layout is a compatibility contract with spreadsheet users:
//!
//! ```text
//! Group Name,Member Name,Role,Template
//! Ion Grid 512,"Zoe Nova","Lead","Standard Squad Protocol"
//! ```

use crate::allocation::Group;
use crate::Result;
use chrono::NaiveDate;
use std::io::Write;

/// Header row of the export
pub const CSV_HEADER: &str = "Group Name,Member Name,Role,Template";

/// Quote a field, doubling any embedded quotes
fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Render groups as a CSV table, one row per (group, member) pair
pub fn to_csv(groups: &[Group]) -> String {
    let mut csv = String::with_capacity(64 * (1 + groups.iter().map(Group::len).sum::<usize>()));
    csv.push_str(CSV_HEADER);
    csv.push('\n');
    for group in groups {
        for assigned in &group.members {
            csv.push_str(&format!(
                "{},{},{},{}\n",
                group.name,
                quoted(&assigned.member.name),
                quoted(&assigned.role_name),
                quoted(&group.template_name)
            ));
        }
    }
    csv
}

/// Write the CSV table to `writer`
pub fn write_csv<W: Write>(groups: &[Group], mut writer: W) -> Result<()> {
    writer.write_all(to_csv(groups).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Conventional download name for an export made on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("Cohort_Export_{}.csv", date.format("%Y-%m-%d"))
}
