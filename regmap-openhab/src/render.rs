//! Textual records of the openHAB things and items formats.
//!
//! Each record is a small borrowed view implementing [`Display`]; the
//! generator decides where the records go and [`BlockWriter`] handles the
//! indentation of nested bridges.

use std::fmt::{self, Display, Formatter};

use regmap_catalog::{Location, PollKind};

const INDENT: &str = "    ";

/// Writes lines and nested `header {` ... `}` blocks into a string.
#[derive(Debug)]
pub struct BlockWriter<'a> {
    out: &'a mut String,
    depth: usize,
}

impl<'a> BlockWriter<'a> {
    pub fn new(out: &'a mut String) -> Self {
        Self { out, depth: 0 }
    }

    /// Write one line at the current depth.
    pub fn line(&mut self, line: impl Display) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push_str(&line.to_string());
        self.out.push('\n');
    }

    /// Write `header {`, the body one level deeper, then a lone `}`.
    pub fn block(&mut self, header: impl Display, body: impl FnOnce(&mut BlockWriter<'_>)) {
        self.line(format_args!("{} {{", header));

        let mut inner = BlockWriter {
            out: &mut *self.out,
            depth: self.depth + 1,
        };
        body(&mut inner);

        self.line("}");
    }
}

/// Join values as `"a", "b"`.
struct QuotedList<'a, T>(&'a [T]);

impl<T: Display> Display for QuotedList<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{}\"", value)?;
        }
        Ok(())
    }
}

/// `Bridge modbus:tcp:...`: the TCP connection of one slave group.
#[derive(Debug)]
pub struct TcpBridge<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub host: &'a str,
    pub unit_id: u32,
}

impl Display for TcpBridge<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bridge modbus:tcp:{} \"{}\" [ host=\"{}\", id=\"{}\" ]",
            self.id, self.label, self.host, self.unit_id
        )
    }
}

/// `Bridge poller ...`: one read window.
#[derive(Debug)]
pub struct PollerBridge<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub start: u32,
    pub length: u32,
    pub kind: PollKind,
}

impl Display for PollerBridge<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bridge poller {} \"{}\" [ start=\"{}\", length=\"{}\", type=\"{}\", maxTries=\"1\" ]",
            self.id, self.label, self.start, self.length, self.kind
        )
    }
}

/// `Thing data ...`: one data point inside a poller.
#[derive(Debug)]
pub struct DataThing<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub location: &'a Location,
    pub read_start: u32,
    pub value_type: &'a str,
    pub transforms: &'a [String],
}

impl Display for DataThing<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Thing data {} \"{}\" @ \"{}\" [ readStart=\"{}\", readValueType=\"{}\"",
            self.id, self.label, self.location, self.read_start, self.value_type
        )?;
        if !self.transforms.is_empty() {
            write!(f, ", readTransform=\"{}\"", self.transforms.join("∩"))?;
        }
        f.write_str(" ]")
    }
}

/// `Group ...`: the group item of one device.
#[derive(Debug)]
pub struct GroupItem<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub icon: &'a str,
    pub location: &'a Location,
    pub tags: &'a [String],
}

impl Display for GroupItem<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Group {} \"{}\"", self.id, self.label)?;
        if !self.icon.is_empty() {
            write!(f, " <{}>", self.icon)?;
        }
        write!(f, " (gModbus,g{}) [{}]", self.location, QuotedList(self.tags))
    }
}

/// `Number:...`: the item of one property, linked to its data point and
/// persisted to InfluxDB.
#[derive(Debug)]
pub struct NumberItem<'a> {
    pub id: &'a str,
    pub label: &'a str,
    pub quantity: Option<&'a str>,
    pub format: &'a str,
    pub icon: &'a str,
    pub group_id: &'a str,
    pub semantic_tag: Option<&'a str>,
    pub tcp_bridge_id: &'a str,
    pub poller_id: &'a str,
    pub gain: &'a str,
    pub location: &'a Location,
}

impl Display for NumberItem<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number:{} {} \"{} [{}]\"",
            self.quantity.unwrap_or("Dimensionless"),
            self.id,
            self.label,
            self.format
        )?;
        if !self.icon.is_empty() {
            write!(f, " <{}>", self.icon)?;
        }

        let mut tags = vec!["Measurement"];
        tags.extend(self.semantic_tag);
        write!(f, " (gModbus,{}) [{}]", self.group_id, QuotedList(&tags))?;

        write!(
            f,
            " {{channel=\"modbus:data:{}:{}:{}:number\" [profile=\"modbus:gainOffset\", gain=\"{}\"], ",
            self.tcp_bridge_id, self.poller_id, self.id, self.gain
        )?;
        write!(
            f,
            "influxdb=\"{}\" [location=\"{}\", building=\"{}\", floor=\"{}\"]}}",
            self.id,
            self.location,
            self.location.building(),
            self.location.floor()
        )
    }
}
