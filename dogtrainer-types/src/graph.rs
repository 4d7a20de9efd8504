//! Timeseries graph definitions for timeboards.

use serde::Deserialize;
use serde_json::{json, Value};

/// A horizontal marker line drawn on a graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Marker {
    pub name: String,
    pub value: f64,
}

impl Marker {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    fn to_value(&self) -> Value {
        json!({
            "type": "error dashed",
            "val": self.value.to_string(),
            "value": format!("y = {}", self.value),
            "label": format!("{}=={}", self.name, self.value),
        })
    }
}

/// A line chart of one or more queries, with optional markers.
///
/// Deserializes from the `{title, queries, markers}` shorthand accepted in
/// definitions files.
///
/// ```rust
/// use dogtrainer_types::Graph;
///
/// let graph = Graph::new("latency")
///     .query("avg:app.latency{*}")
///     .query("p99:app.latency{*}")
///     .build();
/// assert_eq!(graph["definition"]["requests"].as_array().unwrap().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Graph {
    pub title: String,
    pub queries: Vec<String>,
    #[serde(default)]
    pub markers: Vec<Marker>,
}

impl Graph {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            queries: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.queries.push(query.into());
        self
    }

    pub fn marker(mut self, name: impl Into<String>, value: f64) -> Self {
        self.markers.push(Marker::new(name, value));
        self
    }

    /// Render the graph document in the form the timeboard API takes.
    pub fn build(&self) -> Value {
        let requests: Vec<Value> = self
            .queries
            .iter()
            .map(|q| {
                json!({
                    "q": q,
                    "conditional_formats": [],
                    "type": "line",
                })
            })
            .collect();

        let mut definition = serde_json::Map::new();
        definition.insert("viz".to_string(), json!("timeseries"));
        definition.insert("requests".to_string(), Value::Array(requests));
        if !self.markers.is_empty() {
            definition.insert(
                "markers".to_string(),
                self.markers.iter().map(Marker::to_value).collect(),
            );
        }

        json!({
            "definition": Value::Object(definition),
            "title": self.title,
        })
    }
}

/// One-shot form of [`Graph`]: title, queries and `(name, value)` markers.
pub fn graphdef<Q, M, S>(title: &str, queries: Q, markers: M) -> Value
where
    Q: IntoIterator<Item = S>,
    M: IntoIterator<Item = (S, f64)>,
    S: Into<String>,
{
    let mut graph = Graph::new(title);
    for query in queries {
        graph = graph.query(query);
    }
    for (name, value) in markers {
        graph = graph.marker(name, value);
    }
    graph.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_with_defaults() {
        let expected = json!({
            "definition": {
                "viz": "timeseries",
                "requests": [
                    { "q": "query1", "conditional_formats": [], "type": "line" }
                ]
            },
            "title": "gtitle"
        });
        assert_eq!(Graph::new("gtitle").query("query1").build(), expected);
    }

    #[test]
    fn test_graph_with_several_queries() {
        let graph = graphdef("gtitle", ["query1", "query2", "query3"], []);
        let requests = graph["definition"]["requests"].as_array().unwrap();
        let queries: Vec<_> = requests.iter().map(|r| r["q"].as_str().unwrap()).collect();
        assert_eq!(queries, ["query1", "query2", "query3"]);
        assert!(graph["definition"].get("markers").is_none());
    }

    #[test]
    fn test_graph_markers() {
        let graph = graphdef("gtitle", ["query1"], [("marker1", 2.3), ("m2", 45.0)]);
        assert_eq!(
            graph["definition"]["markers"],
            json!([
                { "type": "error dashed", "val": "2.3", "value": "y = 2.3", "label": "marker1==2.3" },
                { "type": "error dashed", "val": "45", "value": "y = 45", "label": "m2==45" }
            ])
        );
    }

    #[test]
    fn test_graph_shorthand_deserializes() {
        let graph: Graph = serde_json::from_value(json!({
            "title": "g",
            "queries": ["q1"],
            "markers": [{"name": "max", "value": 10}]
        }))
        .unwrap();
        assert_eq!(graph, Graph::new("g").query("q1").marker("max", 10.0));
    }
}
