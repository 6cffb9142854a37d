//! Generation pipeline: services → methods → flattened parameter tables.
//!
//! Failures are contained: a service without tables or a method whose
//! schema cannot be flattened is recorded in the [`Report`] and the rest of
//! the document is still produced.

use crate::assemble::DocumentBuilder;
use crate::catalog::TypeCatalog;
use crate::error::DocError;
use crate::flatten::{FlattenOptions, SchemaFlattener};
use crate::link;
use crate::locale::Locale;
use crate::model::*;
use crate::source::TableReader;
use crate::toc::TocIndex;
use clap::ValueEnum;
use std::fmt;
use tracing::{debug, error, info_span};

/// Where the fixed `code`/`message` rows go in a response table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusRows {
    /// Before the flattened rows
    First,
    /// After the flattened rows
    #[default]
    Last,
}

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub title: String,
    pub locale: Locale,
    pub flatten: FlattenOptions,
    pub status_rows: StatusRows,
    /// Service display names to include; empty means all.
    pub services: Vec<String>,
}

/// A contained failure, located by service and optionally method/table.
#[derive(Debug)]
pub struct Failure {
    pub service: String,
    pub method: Option<String>,
    pub role: Option<Role>,
    pub error: DocError,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.service)?;
        if let Some(ref method) = self.method {
            write!(f, "/{}", method)?;
        }
        if let Some(role) = self.role {
            let side = match role {
                Role::Request => "request",
                Role::Response => "response",
            };
            write!(f, " ({})", side)?;
        }
        write!(f, ": {}", self.error)
    }
}

#[derive(Debug)]
pub struct Report {
    pub document: ApiDocument,
    pub failures: Vec<Failure>,
}

/// The fixed response rows every method carries.
pub fn status_rows(locale: Locale) -> [ParamRow; 2] {
    let labels = locale.labels();
    [
        ParamRow::new("code", "int", true, labels.code),
        ParamRow::new("message", "string", true, labels.message),
    ]
}

/// Build the document for every service listed in the table of contents.
pub fn generate<R: TableReader + ?Sized>(
    toc: &TocIndex,
    reader: &R,
    catalog: &TypeCatalog,
    options: &GenerateOptions,
) -> Report {
    let flattener = SchemaFlattener::new(reader, catalog, &options.flatten);
    let mut builder = DocumentBuilder::new(options.title.clone());
    let mut failures = Vec::new();

    for service in toc.service_entries() {
        if !options.services.is_empty() && !options.services.contains(&service.display_name) {
            debug!(service = %service.display_name, "service filtered out");
            continue;
        }
        let _span = info_span!("service", name = %service.display_name).entered();

        let tables = reader.tables_by_anchor(&service.anchor).unwrap_or_default();
        let records = match tables {
            [] => {
                let error = DocError::MissingServiceTables {
                    service: service.display_name.clone(),
                };
                error!("{error}");
                failures.push(Failure {
                    service: service.display_name.clone(),
                    method: None,
                    role: None,
                    error,
                });
                continue;
            }
            [_] => {
                debug!("service has no HTTP bindings");
                Vec::new()
            }
            [methods, ..] => match link::find_route_table(tables) {
                Some(routes) => link::link(methods, routes),
                None => {
                    let error = DocError::MissingRouteTable {
                        service: service.display_name.clone(),
                    };
                    error!("{error}");
                    failures.push(Failure {
                        service: service.display_name.clone(),
                        method: None,
                        role: None,
                        error,
                    });
                    continue;
                }
            },
        };
        debug!(methods = records.len(), "linked methods to routes");

        for record in &records {
            builder.begin_method_section(&service.display_name, record);

            for (role, anchor) in [
                (Role::Request, &record.request_anchor),
                (Role::Response, &record.response_anchor),
            ] {
                let flattened = flattener.flatten(anchor, role);
                let status: Vec<ParamRow> = match (role, &flattened) {
                    (Role::Response, Ok(rows)) => status_rows(options.locale)
                        .into_iter()
                        .filter(|status| {
                            let taken = rows.iter().any(|r| r.qualified_name == status.qualified_name);
                            if taken {
                                debug!(name = %status.qualified_name, "response defines status row itself");
                            }
                            !taken
                        })
                        .collect(),
                    _ => Vec::new(),
                };

                match flattened {
                    Ok(rows) => {
                        let (seed, tail) = match options.status_rows {
                            StatusRows::First => (status, Vec::new()),
                            StatusRows::Last => (Vec::new(), status),
                        };
                        builder.begin_param_table(role, &seed);
                        for row in rows.into_iter().chain(tail) {
                            builder.append_row(row);
                        }
                    }
                    Err(e) => {
                        error!(method = %record.name, ?role, anchor = e.anchor(), "{e}");
                        builder.begin_param_table(role, &[]);
                        builder.fail_param_table(role, &e);
                        failures.push(Failure {
                            service: service.display_name.clone(),
                            method: Some(record.name.clone()),
                            role: Some(role),
                            error: e,
                        });
                    }
                }
            }

            builder.end_section();
        }
    }

    Report {
        document: builder.finish(),
        failures,
    }
}
