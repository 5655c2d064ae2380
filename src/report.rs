use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use ahash::AHashMap;
use log::info;

use crate::error::Result;
use crate::types::Table;

/// Builds one report line per cluster: the display values of its members
/// in original row order, joined with ", ". Clusters appear in the order
/// their id first occurs in the table, which for ids assigned by the
/// greedy pass is ascending claiming-position order.
pub fn cluster_lines(table: &Table) -> Vec<String> {
    let mut order: Vec<usize> = Vec::new();
    let mut members: AHashMap<usize, Vec<&str>> = AHashMap::new();

    for row in table.rows() {
        let cluster = match row.cluster {
            Some(cluster) => cluster,
            None => continue,
        };
        if !members.contains_key(&cluster) {
            order.push(cluster);
            members.insert(cluster, Vec::new());
        }
        if let Some(group) = members.get_mut(&cluster) {
            group.push(row.display_value.as_str());
        }
    }

    order
        .iter()
        .filter_map(|cluster| members.get(cluster))
        .map(|group| group.join(", "))
        .collect()
}

/// Writes the cluster report, one line per cluster, logging each line as
/// it is emitted. An empty table produces an empty file.
pub fn write_report<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);

    for line in cluster_lines(table) {
        info!("{}", line);
        writeln!(writer, "{}", line)?;
    }
    writer.flush()?;
    Ok(())
}
