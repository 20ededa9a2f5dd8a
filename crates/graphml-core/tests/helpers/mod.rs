#![allow(dead_code)]

use std::cell::RefCell;
use std::sync::Once;

use log::kv::{Error as KvError, Key, Value, VisitSource};
use log::{Level, LevelFilter, Log, Metadata, Record};

pub const GRAPHML_ROOT_OPEN: &str = r#"<graphml xmlns="http://graphml.graphdrawing.org/xmlns" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:y="http://www.yworks.com/xml/graphml" xsi:schemaLocation="http://graphml.graphdrawing.org/xmlns http://www.yworks.com/xml/schema/graphml/1.1/ygraphml.xsd">"#;

/// Wrap `body` in a `graphml` root declaring the yWorks prefix `y`.
pub fn graphml(body: &str) -> String {
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{GRAPHML_ROOT_OPEN}\n{body}\n</graphml>")
}

/// A yEd `ShapeNode` node.
pub fn shape_node(id: &str, x: f64, y: f64, width: f64, height: f64) -> String {
    format!(
        r##"<node id="{id}"><data key="d6"><y:ShapeNode><y:Geometry x="{x}" y="{y}" width="{width}" height="{height}"/><y:Fill color="#FFCC00" transparent="false"/><y:NodeLabel x="4" y="6" width="20" height="18">{id}</y:NodeLabel><y:Shape type="rectangle"/></y:ShapeNode></data></node>"##
    )
}

/// A yEd `PolyLineEdge` edge with optional bend points.
pub fn poly_line_edge(id: &str, source: &str, target: &str, points: &[(f64, f64)]) -> String {
    let points: String = points
        .iter()
        .map(|(x, y)| format!(r#"<y:Point x="{x}" y="{y}"/>"#))
        .collect();
    format!(
        r##"<edge id="{id}" source="{source}" target="{target}"><data key="d10"><y:PolyLineEdge><y:Path sx="0.0" sy="0.0" tx="0.0" ty="0.0">{points}</y:Path><y:LineStyle color="#000000" type="line" width="1.0"/><y:Arrows source="none" target="standard"/></y:PolyLineEdge></data></edge>"##
    )
}

#[derive(Debug, Clone)]
pub struct Captured {
    pub level: Level,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

impl Captured {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

thread_local! {
    static CAPTURED: RefCell<Vec<Captured>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

struct FieldCollector(Vec<(String, String)>);

impl<'kvs> VisitSource<'kvs> for FieldCollector {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), KvError> {
        self.0.push((key.to_string(), value.to_string()));
        Ok(())
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        let mut fields = FieldCollector(Vec::new());
        let _ = record.key_values().visit(&mut fields);
        let captured = Captured {
            level: record.level(),
            message: record.args().to_string(),
            fields: fields.0,
        };
        CAPTURED.with(|c| c.borrow_mut().push(captured));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Run `f` and return its result with every record it logged on this thread.
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, Vec<Captured>) {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).expect("no other logger installed in tests");
        log::set_max_level(LevelFilter::Trace);
    });
    CAPTURED.with(|c| c.borrow_mut().clear());
    let result = f();
    let records = CAPTURED.with(|c| std::mem::take(&mut *c.borrow_mut()));
    (result, records)
}

pub fn warnings(records: &[Captured]) -> Vec<&Captured> {
    records.iter().filter(|r| r.level == Level::Warn).collect()
}
