//! Primitive wire encodings understood by the openHAB Modbus binding.

use serde::{Deserialize, Serialize};

/// Base wire encoding of a register value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireKind {
    Bit,
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Int64,
    Uint64,
    Float32,
}

impl WireKind {
    /// Return the binding's name for this encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            WireKind::Bit => "bit",
            WireKind::Int8 => "int8",
            WireKind::Uint8 => "uint8",
            WireKind::Int16 => "int16",
            WireKind::Uint16 => "uint16",
            WireKind::Int32 => "int32",
            WireKind::Uint32 => "uint32",
            WireKind::Int64 => "int64",
            WireKind::Uint64 => "uint64",
            WireKind::Float32 => "float32",
        }
    }
}

impl std::fmt::Display for WireKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encoding of a property on the wire.
///
/// Value types are immutable. Specializations are derived from the
/// predefined constants through the `with_*` builders, which return a new
/// value and leave the original untouched:
///
/// ```
/// use regmap_catalog::value_type::{U16, WireKind};
///
/// let level = U16.with_null(65535).with_scale(100.0);
/// assert_eq!(level.kind, WireKind::Uint16);
/// assert_eq!(U16.null, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueType {
    /// Base encoding.
    pub kind: WireKind,
    /// Size in registers.
    pub size: u32,
    /// The device reports the physical value multiplied by this factor.
    pub scale: f64,
    /// Name of a JS transform applied before anything else.
    pub transform: Option<&'static str>,
    /// Raw value meaning "no reading".
    pub null: Option<i64>,
    /// Register order is swapped for multi-register values.
    pub swapped: bool,
}

impl ValueType {
    pub const fn new(kind: WireKind, size: u32) -> Self {
        Self {
            kind,
            size,
            scale: 1.0,
            transform: None,
            null: None,
            swapped: false,
        }
    }

    pub const fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    pub const fn with_null(self, null: i64) -> Self {
        Self {
            null: Some(null),
            ..self
        }
    }

    pub const fn with_transform(self, transform: &'static str) -> Self {
        Self {
            transform: Some(transform),
            ..self
        }
    }

    pub const fn swapped(self) -> Self {
        Self {
            swapped: true,
            ..self
        }
    }

    /// Full encoding name, e.g. `float32` or `uint32_swap`.
    pub fn wire_encoding(&self) -> String {
        if self.swapped {
            format!("{}_swap", self.kind)
        } else {
            self.kind.to_string()
        }
    }

    /// Ordered read transform chain: unit fix first, then the null check.
    pub fn transforms(&self) -> Vec<String> {
        let mut transforms = Vec::new();
        if let Some(transform) = self.transform {
            transforms.push(format!("JS:{}.js", transform));
        }
        if let Some(null) = self.null {
            transforms.push(format!("JS:null.js?when={}", null));
        }
        transforms
    }

    /// Gain factor converting the raw value into the physical unit.
    pub fn gain(&self) -> f64 {
        1.0 / self.scale
    }
}

pub const U16: ValueType = ValueType::new(WireKind::Uint16, 1);
pub const U16S: ValueType = U16.swapped();
pub const U32: ValueType = ValueType::new(WireKind::Uint32, 2);
pub const U32S: ValueType = U32.swapped();
pub const U64: ValueType = ValueType::new(WireKind::Uint64, 4);
pub const I16: ValueType = ValueType::new(WireKind::Int16, 1);
pub const I32: ValueType = ValueType::new(WireKind::Int32, 2);
pub const I32S: ValueType = I32.swapped();
pub const I64: ValueType = ValueType::new(WireKind::Int64, 4);
pub const F32: ValueType = ValueType::new(WireKind::Float32, 2);
pub const BIT: ValueType = ValueType::new(WireKind::Bit, 1);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_encoding() {
        assert_eq!(F32.wire_encoding(), "float32");
        assert_eq!(U32S.wire_encoding(), "uint32_swap");
        assert_eq!(I16.wire_encoding(), "int16");
    }

    #[test]
    fn test_override_leaves_original_untouched() {
        let scaled = I16.with_null(-32768).with_scale(10.0);

        assert_eq!(scaled.scale, 10.0);
        assert_eq!(scaled.null, Some(-32768));
        assert_eq!(I16.scale, 1.0);
        assert_eq!(I16.null, None);
        assert_eq!(scaled.size, 1);
    }

    #[test]
    fn test_transform_order() {
        assert!(U16.transforms().is_empty());
        assert_eq!(U16.with_null(65535).transforms(), vec!["JS:null.js?when=65535"]);
        assert_eq!(
            U16.with_null(65535).with_transform("wh_to_kwh").transforms(),
            vec!["JS:wh_to_kwh.js", "JS:null.js?when=65535"]
        );
    }

    #[test]
    fn test_gain() {
        assert_eq!(U16.with_scale(10.0).gain(), 0.1);
        assert_eq!(U16.gain(), 1.0);
    }
}
