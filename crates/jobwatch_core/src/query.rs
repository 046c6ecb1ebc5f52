//! Conversion between filter selections and the query/hash text that carries them.
//!
//! No percent-escaping is applied in either direction: a value containing `&`
//! or `=` cannot survive a round trip. The service and existing bookmarks rely
//! on the raw form, so it is kept as is.

/// Selector value meaning "no filter on this dimension".
pub const ANY: &str = "Any";

/// Current status/engine selection. [`ANY`] in a field means unfiltered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Filter {
    pub status: String,
    pub engine: String,
}

impl Default for Filter {
    fn default() -> Self {
        Self::any()
    }
}

impl Filter {
    pub fn any() -> Self {
        Self::new(ANY, ANY)
    }

    pub fn new(status: impl Into<String>, engine: impl Into<String>) -> Self {
        Self {
            status: normalize(status.into()),
            engine: normalize(engine.into()),
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = normalize(status.into());
        self
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = normalize(engine.into());
        self
    }

    pub fn is_unfiltered(&self) -> bool {
        is_any(&self.status) && is_any(&self.engine)
    }
}

/// Keys recognised in a decoded hash fragment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pub st: Option<String>,
    pub eng: Option<String>,
}

impl QueryParams {
    /// Absent and empty values both fall back to [`ANY`].
    pub fn into_filter(self) -> Filter {
        Filter::new(
            self.st.unwrap_or_default(),
            self.eng.unwrap_or_default(),
        )
    }
}

/// Builds `?st=..&eng=..&min-id=..`, leaving out unfiltered fields and a zero
/// `min_id`. Returns an empty string when nothing is set.
pub fn encode(filter: &Filter, min_id: u64) -> String {
    let mut args = Vec::with_capacity(3);
    if !is_any(&filter.status) {
        args.push(format!("st={}", filter.status));
    }
    if !is_any(&filter.engine) {
        args.push(format!("eng={}", filter.engine));
    }
    if min_id > 0 {
        args.push(format!("min-id={min_id}"));
    }
    if args.is_empty() {
        String::new()
    } else {
        format!("?{}", args.join("&"))
    }
}

/// Parses `key=value` pairs joined by `&`, as produced by [`encode`].
///
/// A leading `?` is ignored. Tokens without `=` are skipped; a repeated key
/// keeps its last value; unknown keys are ignored.
pub fn decode(query: &str) -> QueryParams {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut params = QueryParams::default();
    for token in query.split('&') {
        let Some((key, value)) = token.split_once('=') else {
            continue;
        };
        match key {
            "st" => params.st = Some(value.to_string()),
            "eng" => params.eng = Some(value.to_string()),
            _ => {}
        }
    }
    params
}

/// Address-bar hash representing `filter`, always starting with `#`.
pub fn hash_for(filter: &Filter) -> String {
    format!("#{}", encode(filter, 0))
}

/// Filter carried by an address-bar hash. Only the text after the first `?`
/// holds parameters; a hash without one is unfiltered.
pub fn filter_from_hash(hash: &str) -> Filter {
    match hash.split_once('?') {
        Some((_, query)) => decode(query).into_filter(),
        None => Filter::any(),
    }
}

fn is_any(value: &str) -> bool {
    value == ANY
}

fn normalize(value: String) -> String {
    if value.is_empty() {
        ANY.to_string()
    } else {
        value
    }
}
