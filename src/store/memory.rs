use async_trait::async_trait;
use log::debug;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::RwLock;

use super::{Filter, Query, RecordStore};
use crate::error::RecipeError;

/// In-process record store
///
/// Used for tests and for running without a hosted database. Ids are
/// assigned sequentially as strings when a row arrives without one.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Vec<Map<String, Value>>>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently in `table`.
    pub fn len(&self, table: &str) -> usize {
        self.tables
            .read()
            .map(|tables| tables.get(table).map_or(0, Vec::len))
            .unwrap_or(0)
    }

    pub fn is_empty(&self, table: &str) -> bool {
        self.len(table) == 0
    }
}

fn poisoned<T>(_: T) -> RecipeError {
    RecipeError::StoreError("memory store lock poisoned".to_string())
}

fn into_object(row: Value) -> Result<Map<String, Value>, RecipeError> {
    match row {
        Value::Object(map) => Ok(map),
        other => Err(RecipeError::StoreError(format!(
            "expected a JSON object row, got {other}"
        ))),
    }
}

fn row_id(row: &Map<String, Value>) -> Option<String> {
    match row.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) => Some(Ordering::Less),
        (_, Value::Null) => Some(Ordering::Greater),
        _ => None,
    }
}

fn matches(row: &Map<String, Value>, filter: &Filter) -> bool {
    let cell = row.get(filter.column()).unwrap_or(&Value::Null);
    match filter {
        Filter::Eq(_, value) => cell == value,
        Filter::Gte(_, value) => matches!(
            compare(cell, value),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Filter::Lte(_, value) => {
            matches!(compare(cell, value), Some(Ordering::Less | Ordering::Equal))
        }
    }
}

fn project(row: &Map<String, Value>, columns: &[String]) -> Value {
    if columns.is_empty() {
        return Value::Object(row.clone());
    }
    Value::Object(
        columns
            .iter()
            .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
            .collect(),
    )
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RecipeError> {
        let mut row = into_object(row)?;
        if row_id(&row).is_none() {
            let id = self.next_id.fetch_add(1, AtomicOrdering::Relaxed) + 1;
            row.insert("id".to_string(), Value::String(id.to_string()));
        }
        debug!("Inserting into {}: {:?}", table, row.get("id"));

        let mut tables = self.tables.write().map_err(poisoned)?;
        tables.entry(table.to_string()).or_default().push(row.clone());
        Ok(Value::Object(row))
    }

    async fn update(&self, table: &str, id: &str, changes: Value) -> Result<Value, RecipeError> {
        let changes = into_object(changes)?;
        let mut tables = self.tables.write().map_err(poisoned)?;
        let row = tables
            .get_mut(table)
            .and_then(|rows| rows.iter_mut().find(|r| row_id(r).as_deref() == Some(id)))
            .ok_or_else(|| RecipeError::StoreError(format!("No row {id} in {table}")))?;

        for (key, value) in changes {
            if key != "id" {
                row.insert(key, value);
            }
        }
        Ok(Value::Object(row.clone()))
    }

    async fn delete(&self, table: &str, id: &str) -> Result<(), RecipeError> {
        let mut tables = self.tables.write().map_err(poisoned)?;
        if let Some(rows) = tables.get_mut(table) {
            rows.retain(|r| row_id(r).as_deref() != Some(id));
        }
        Ok(())
    }

    async fn query(&self, table: &str, query: &Query) -> Result<Vec<Value>, RecipeError> {
        let tables = self.tables.read().map_err(poisoned)?;
        let Some(rows) = tables.get(table) else {
            return Ok(Vec::new());
        };

        let mut selected: Vec<&Map<String, Value>> = rows
            .iter()
            .filter(|row| query.filters.iter().all(|f| matches(row, f)))
            .collect();

        selected.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|order| {
                    let ord = compare(
                        a.get(&order.column).unwrap_or(&Value::Null),
                        b.get(&order.column).unwrap_or(&Value::Null),
                    )
                    .unwrap_or(Ordering::Equal);
                    if order.descending {
                        ord.reverse()
                    } else {
                        ord
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });

        Ok(selected
            .into_iter()
            .map(|row| project(row, &query.columns))
            .collect())
    }
}
