//! Query engine
//!
//! Runs query text end to end against a [`RowSource`].
//!
//! Execution flow (strict order):
//! 1. Parse the text; flag or refuse ungrouped aggregates
//! 2. Load the main table
//! 3. Load the join table and join (if requested)
//! 4. Filter by WHERE conditions
//! 5. Sort by ORDER BY (when enabled)
//! 6. Project the requested fields
//!
//! The first error aborts the query; nothing partial is returned.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{QueryError, QueryResult};
use crate::observability::{log_event, Event, ObservationScope, QueryMetrics};
use crate::parser::{parse_query, QueryRequest};
use crate::source::{Row, RowSource};

use super::filters::PredicateEvaluator;
use super::join::JoinEngine;
use super::result::{expand_join_wildcard, project, ResultRow};
use super::sorter::ResultSorter;

/// Executes queries against a shared row source
#[derive(Clone)]
pub struct QueryEngine {
    source: Arc<dyn RowSource>,
    config: EngineConfig,
    evaluator: PredicateEvaluator,
    metrics: Arc<QueryMetrics>,
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine")
            .field("config", &self.config)
            .field("evaluator", &self.evaluator)
            .field("metrics", &self.metrics)
            .finish_non_exhaustive()
    }
}

impl QueryEngine {
    /// Creates an engine with the default configuration
    pub fn new(source: Arc<dyn RowSource>) -> Self {
        Self::with_config(source, EngineConfig::default())
    }

    /// Creates an engine with an explicit configuration
    pub fn with_config(source: Arc<dyn RowSource>, config: EngineConfig) -> Self {
        Self {
            source,
            evaluator: PredicateEvaluator::with_like_matching(config.like_matching),
            config,
            metrics: Arc::new(QueryMetrics::new()),
        }
    }

    /// Returns the active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the counters shared by this engine and its clones
    pub fn metrics(&self) -> Arc<QueryMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Parses and executes `query`.
    pub async fn execute(&self, query: &str) -> QueryResult<Vec<ResultRow>> {
        let query_id = Uuid::new_v4().to_string();
        let scope = self.begin_scope(&query_id);
        let result = self.parse_and_run(query, &query_id).await;
        self.finish(scope, result)
    }

    /// Executes an already parsed request.
    ///
    /// The ungrouped-aggregate policy is not applied here; it belongs to
    /// the query text.
    pub async fn execute_request(&self, request: &QueryRequest) -> QueryResult<Vec<ResultRow>> {
        let query_id = Uuid::new_v4().to_string();
        let scope = self.begin_scope(&query_id);
        let result = self.run(request, &query_id).await;
        self.finish(scope, result)
    }

    async fn parse_and_run(&self, query: &str, query_id: &str) -> QueryResult<Vec<ResultRow>> {
        let request = parse_query(query)?;

        let join_table = request.join.as_ref().map_or("none", |j| j.table.as_str());
        let conditions = request.where_clauses.len().to_string();
        self.log(
            Event::QueryParsed,
            &[
                ("query_id", query_id),
                ("table", request.table.as_str()),
                ("join", join_table),
                ("conditions", conditions.as_str()),
            ],
        );

        if request.has_ungrouped_aggregate {
            self.log(
                Event::UngroupedAggregate,
                &[("query_id", query_id), ("table", request.table.as_str())],
            );
            if self.config.reject_ungrouped_aggregate {
                self.log(
                    Event::QueryRejected,
                    &[("query_id", query_id), ("reason", "ungrouped aggregate")],
                );
                return Err(QueryError::UngroupedAggregate(query.trim().to_string()));
            }
        }

        self.run(&request, query_id).await
    }

    async fn run(&self, request: &QueryRequest, query_id: &str) -> QueryResult<Vec<ResultRow>> {
        // Step 2
        let main_rows = self.load(&request.table, query_id).await?;

        // Step 3
        let (mut rows, projection) = match &request.join {
            Some(join) => {
                let join_rows = self.load(&join.table, query_id).await?;

                let projection = expand_join_wildcard(
                    &request.fields,
                    &request.table,
                    &main_rows,
                    &join.table,
                    &join_rows,
                );
                let mut join_fields = projection.clone();
                for field in request.auxiliary_fields() {
                    if !join_fields.contains(&field) {
                        join_fields.push(field);
                    }
                }

                let joined = JoinEngine::join(
                    join.kind,
                    &main_rows,
                    &join_rows,
                    &join.condition,
                    &join_fields,
                    &request.table,
                );

                self.metrics.add_rows_joined(joined.len());
                self.log(
                    Event::JoinApplied,
                    &[
                        ("query_id", query_id),
                        ("kind", join.kind.as_str()),
                        ("rows", joined.len().to_string().as_str()),
                    ],
                );
                (joined, projection)
            }
            None => (main_rows, request.fields.clone()),
        };

        // Step 4
        if !request.where_clauses.is_empty() {
            let before = rows.len();
            let mut kept = Vec::with_capacity(before);
            for row in rows {
                if self.evaluator.matches_all(&row, &request.where_clauses)? {
                    kept.push(row);
                }
            }
            rows = kept;

            self.metrics.add_rows_filtered_out(before - rows.len());
            self.log(
                Event::FilterApplied,
                &[
                    ("query_id", query_id),
                    ("rows_in", before.to_string().as_str()),
                    ("rows_out", rows.len().to_string().as_str()),
                ],
            );
        }

        // Step 5
        if self.config.apply_order_by {
            if let Some(keys) = &request.order_by_fields {
                ResultSorter::sort(&mut rows, keys);
                self.log(
                    Event::SortApplied,
                    &[("query_id", query_id), ("keys", keys.len().to_string().as_str())],
                );
            }
        }

        // Step 6
        Ok(rows.iter().map(|row| project(row, &projection)).collect())
    }

    async fn load(&self, table: &str, query_id: &str) -> QueryResult<Vec<Row>> {
        let rows = self.source.load(table).await?;
        self.metrics.add_rows_loaded(rows.len());
        self.log(
            Event::TableLoaded,
            &[
                ("query_id", query_id),
                ("table", table),
                ("rows", rows.len().to_string().as_str()),
            ],
        );
        Ok(rows)
    }

    fn begin_scope(&self, query_id: &str) -> ObservationScope {
        ObservationScope::begin("QUERY", &[("query_id", query_id)], self.config.log_events)
    }

    fn finish(
        &self,
        scope: ObservationScope,
        result: QueryResult<Vec<ResultRow>>,
    ) -> QueryResult<Vec<ResultRow>> {
        match &result {
            Ok(rows) => {
                self.metrics.increment_queries_executed();
                self.metrics.add_rows_returned(rows.len());
                scope.complete(&[("rows", rows.len().to_string().as_str())]);
            }
            Err(err) => {
                self.metrics.increment_queries_failed();
                scope.fail(&format!("{}: {}", err.code(), err));
            }
        }
        result
    }

    fn log(&self, event: Event, fields: &[(&str, &str)]) {
        if self.config.log_events {
            log_event(event, fields);
        }
    }
}
