//! Fill and stroke resolution.
//!
//! Each value resolves through the same chain: explicit attribute, then the
//! inline `style` property list, then the parent document element, then a
//! default. Stroke width and opacity default to 1 only when a stroke color was
//! defined somewhere in the chain; the color itself falls back to the `black`
//! sentinel only after those decisions are made. Resolution never fails.

/// Raw presentation attributes of a shape or document element, as written in
/// the source document. All values are the original attribute text.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StyleAttrs {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    #[serde(rename = "stroke-width")]
    pub stroke_width: Option<String>,
    /// Fractional ("0.5") or percentage ("50%") text.
    #[serde(rename = "stroke-opacity")]
    pub stroke_opacity: Option<String>,
    #[serde(rename = "fill-rule")]
    pub fill_rule: Option<String>,
    /// Inline `key:value;key:value` property list, the fallback source for
    /// the attributes above.
    pub style: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResolvedStyle {
    pub fill: Option<String>,
    pub stroke: String,
    pub stroke_width: f64,
    pub stroke_opacity: f64,
}

/// Convention for deciding which subpaths of a multi-subpath shape are filled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

impl StyleAttrs {
    /// Looks up `key` in the inline style property list, ignoring empty
    /// entries and whitespace around keys and values.
    fn style_property(&self, key: &str) -> Option<String> {
        let style = self.style.as_deref()?;
        for entry in style.split(';') {
            let mut parts = entry.splitn(2, ':');
            let (Some(k), Some(v)) = (parts.next(), parts.next()) else {
                continue;
            };
            let (k, v) = (k.trim(), v.trim());
            if k.is_empty() || v.is_empty() {
                continue;
            }
            if k == key {
                return Some(v.to_string());
            }
        }
        None
    }

    /// Fill color from the attribute, else the inline style.
    pub fn fill_color(&self) -> Option<String> {
        self.fill.clone().or_else(|| self.style_property("fill"))
    }

    fn stroke_color(&self) -> Option<String> {
        self.stroke
            .clone()
            .or_else(|| self.style_property("stroke"))
    }

    fn stroke_width_value(&self) -> Option<f64> {
        self.stroke_width
            .clone()
            .or_else(|| self.style_property("stroke-width"))
            .and_then(|v| v.trim().parse().ok())
    }

    fn stroke_opacity_value(&self) -> Option<f64> {
        self.stroke_opacity
            .clone()
            .or_else(|| self.style_property("stroke-opacity"))
            .and_then(|v| parse_opacity(&v))
    }

    pub fn fill_rule(&self) -> FillRule {
        match self.fill_rule.as_deref().map(str::trim) {
            Some("evenodd") => FillRule::EvenOdd,
            _ => FillRule::NonZero,
        }
    }
}

/// Percentage text divides by 100; anything else parses as a fraction.
fn parse_opacity(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Some(percent) = value.strip_suffix('%') {
        percent.trim().parse::<f64>().ok().map(|v| v / 100.0)
    } else {
        value.parse().ok()
    }
}

/// Resolves the full style of one shape element against its parent document
/// element.
pub fn resolve_style(element: &StyleAttrs, parent: &StyleAttrs) -> ResolvedStyle {
    let fill = element.fill_color().or_else(|| parent.fill_color());

    let stroke = element.stroke_color().or_else(|| parent.stroke_color());
    let stroke_defined = stroke.is_some();

    let stroke_width = element
        .stroke_width_value()
        .or_else(|| parent.stroke_width_value())
        .unwrap_or(if stroke_defined { 1.0 } else { 0.0 });
    let stroke_opacity = element
        .stroke_opacity_value()
        .or_else(|| parent.stroke_opacity_value())
        .unwrap_or(if stroke_defined { 1.0 } else { 0.0 });

    ResolvedStyle {
        fill,
        stroke: stroke.unwrap_or_else(|| "black".to_string()),
        stroke_width,
        stroke_opacity,
    }
}
