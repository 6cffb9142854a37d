//! Method/route join: combine a service's two tables by method name.
//!
//! The method table carries `[name, request, response, description]`, the
//! route table `[name, http method, http path, body]`. Route order drives
//! the output; the first method row with a matching name wins; a route with
//! no matching method is dropped.
//!
//! A service may carry option tables between the two; the route table is
//! the one whose header has a `Pattern` column.

use crate::model::MethodRecord;
use crate::source::{Row, Table};
use tracing::{debug, warn};

const ROUTE_PATTERN_COLUMN: &str = "Pattern";

/// The route table among a service's tables. The first table is always the
/// method table and is never considered.
pub fn find_route_table(tables: &[Table]) -> Option<&Table> {
    tables.iter().skip(1).find(|table| {
        table
            .head()
            .iter()
            .any(|column| column.trim().eq_ignore_ascii_case(ROUTE_PATTERN_COLUMN))
    })
}

/// Join one service's method table with its route table.
pub fn link(method_table: &Table, route_table: &Table) -> Vec<MethodRecord> {
    let mut records = Vec::new();

    for route in route_table.rows() {
        let [name, http_method, http_path, ..] = route.as_slice() else {
            warn!(cells = route.len(), "skipping short route row");
            continue;
        };
        let name = name.text();

        let Some(method) = find_method(method_table, name) else {
            debug!(method = name, "route has no matching method; dropped");
            continue;
        };

        match record_from(method, http_method.text(), http_path.text()) {
            Some(record) => records.push(record),
            None => warn!(
                method = name,
                "method row lacks request/response links; skipped"
            ),
        }
    }

    records
}

/// First method row whose name cell equals `name`.
fn find_method<'a>(method_table: &'a Table, name: &str) -> Option<&'a Row> {
    method_table
        .rows()
        .iter()
        .find(|row| row.first().is_some_and(|cell| cell.text() == name))
}

fn record_from(method: &Row, http_method: &str, http_path: &str) -> Option<MethodRecord> {
    let name = method.first()?.text();
    let request_anchor = method.get(1)?.anchor()?;
    let response_anchor = method.get(2)?.anchor()?;
    let description = method.get(3).map(|c| c.text()).unwrap_or_default();

    Some(MethodRecord {
        name: name.to_string(),
        http_method: http_method.to_string(),
        http_path: http_path.to_string(),
        request_anchor: request_anchor.to_string(),
        response_anchor: response_anchor.to_string(),
        description: description.to_string(),
    })
}
