//! Partitioning of property groups into bounded read windows.

use std::ops::Range;

use regmap_catalog::{Property, PropertyGroup};

/// Maximum length of a poller, in registers.
///
/// The protocol allows about 125 registers per read; 120 leaves headroom
/// for devices that reject reads close to the limit.
pub const MAX_POLLER_LEN: u32 = 120;

/// One bounded, contiguous read request covering a run of properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Poller<'a> {
    pub id: String,
    pub display_name: String,
    /// Address of the first property.
    pub start: u32,
    /// Registers from `start` to the end of the last property.
    pub length: u32,
    pub properties: &'a [Property],
}

/// Splits property lists into read windows of at most `max_len` registers.
///
/// The split is greedy: each window extends to the farthest property that
/// still fits, then the next window starts right after it. A property
/// larger than the ceiling gets a window of its own.
#[derive(Debug, Clone, Copy)]
pub struct Partitioner {
    max_len: u32,
}

impl Default for Partitioner {
    fn default() -> Self {
        Self::new(MAX_POLLER_LEN)
    }
}

impl Partitioner {
    pub fn new(max_len: u32) -> Self {
        Self { max_len }
    }

    pub fn max_len(&self) -> u32 {
        self.max_len
    }

    /// Index ranges of each window over `props`, which must be in
    /// ascending address order as [`PropertyGroup`] guarantees.
    fn windows(&self, props: &[Property]) -> Vec<Range<usize>> {
        let mut windows = Vec::new();
        let mut start = 0;

        while start < props.len() {
            let last = (start..props.len())
                .rev()
                .find(|&last| span(&props[start..=last]) <= self.max_len)
                .unwrap_or(start);

            windows.push(start..last + 1);
            start = last + 1;
        }

        windows
    }

    /// Split a group into pollers.
    ///
    /// The first poller keeps the group's id and name; later ones are
    /// suffixed `_2`, `(part 2)`, and so on.
    pub fn split<'a>(&self, group: &'a PropertyGroup) -> Vec<Poller<'a>> {
        let props = group.properties();

        self.windows(props)
            .into_iter()
            .enumerate()
            .map(|(i, range)| {
                let properties = &props[range];
                let (id, display_name) = if i == 0 {
                    (group.id.clone(), group.display_name.clone())
                } else {
                    let part = i + 1;
                    (
                        format!("{}_{}", group.id, part),
                        format!("{} (part {})", group.display_name, part),
                    )
                };

                Poller {
                    id,
                    display_name,
                    start: properties[0].address,
                    length: span(properties),
                    properties,
                }
            })
            .collect()
    }
}

/// Registers covered from the first property to the end of the last one.
fn span(props: &[Property]) -> u32 {
    match (props.first(), props.last()) {
        (Some(first), Some(last)) => last.end().saturating_sub(first.address),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regmap_catalog::value_type::{F32, I64, U16, ValueType};

    fn prop(address: u32, value_type: ValueType) -> Property {
        Property::new(address, value_type, "energy", &format!("p{}", address), "P", None, "%d", None)
    }

    fn group(props: Vec<Property>) -> PropertyGroup {
        PropertyGroup::new("General", "General", props).unwrap()
    }

    /// Deterministic pseudo-random property lists.
    fn sample_lists() -> Vec<Vec<Property>> {
        let types = [U16, F32, I64];
        let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
        let mut lists = Vec::new();

        for len in [0usize, 1, 2, 7, 40, 130, 300] {
            let mut address = 0;
            let mut props = Vec::with_capacity(len);
            for _ in 0..len {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                let value_type = types[(seed >> 33) as usize % types.len()];
                let gap = ((seed >> 40) % 20) as u32;
                props.push(prop(address, value_type));
                address += value_type.size + gap;
            }
            lists.push(props);
        }
        lists
    }

    #[test]
    fn test_consecutive_registers_split_in_two() {
        let group = group((0..130).map(|a| prop(a, U16)).collect());
        let pollers = Partitioner::new(120).split(&group);

        assert_eq!(pollers.len(), 2);
        assert_eq!(pollers[0].start, 0);
        assert_eq!(pollers[0].length, 120);
        assert_eq!(pollers[0].id, "General");
        assert_eq!(pollers[0].display_name, "General");
        assert_eq!(pollers[1].start, 120);
        assert_eq!(pollers[1].length, 10);
        assert_eq!(pollers[1].id, "General_2");
        assert_eq!(pollers[1].display_name, "General (part 2)");
    }

    #[test]
    fn test_third_part_numbering() {
        let group = group((0..250).map(|a| prop(a, U16)).collect());
        let pollers = Partitioner::default().split(&group);

        let ids: Vec<&str> = pollers.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["General", "General_2", "General_3"]);
        assert_eq!(pollers[2].display_name, "General (part 3)");
    }

    #[test]
    fn test_empty_group_yields_no_pollers() {
        let group = group(Vec::new());
        assert!(Partitioner::default().split(&group).is_empty());
    }

    #[test]
    fn test_oversized_property_stands_alone() {
        let props = vec![prop(0, U16), prop(1, I64), prop(5, U16)];
        let windows = Partitioner::new(2).windows(&props);

        assert_eq!(windows, vec![0..1, 1..2, 2..3]);

        let single = vec![prop(10, I64)];
        let group = group(single);
        let pollers = Partitioner::new(3).split(&group);
        assert_eq!(pollers.len(), 1);
        assert_eq!(pollers[0].length, 4);
    }

    #[test]
    fn test_span_of_descending_slice_is_empty() {
        let props = vec![prop(50, U16), prop(10, U16)];
        assert_eq!(span(&props), 0);
        assert_eq!(span(&props[..1]), 1);
        assert_eq!(span(&[]), 0);
    }

    #[test]
    fn test_gaps_count_towards_span() {
        let props = vec![prop(0, F32), prop(100, F32), prop(118, F32), prop(119, U16)];
        let windows = Partitioner::new(120).windows(&props);

        // 118 + 2 = 120 fits, 119 + 1 = 120 fits as well
        assert_eq!(windows, vec![0..4]);

        let props = vec![prop(0, F32), prop(119, F32)];
        assert_eq!(Partitioner::new(120).windows(&props), vec![0..1, 1..2]);
    }

    #[test]
    fn test_windows_reconstruct_input() {
        for props in sample_lists() {
            let windows = Partitioner::new(120).windows(&props);
            let flattened: Vec<usize> = windows.iter().flat_map(|r| r.clone()).collect();
            let expected: Vec<usize> = (0..props.len()).collect();
            assert_eq!(flattened, expected);
        }
    }

    #[test]
    fn test_windows_respect_ceiling_and_are_maximal() {
        for max_len in [4, 16, 120] {
            for props in sample_lists() {
                let windows = Partitioner::new(max_len).windows(&props);

                for (i, window) in windows.iter().enumerate() {
                    let len = span(&props[window.clone()]);
                    assert!(len <= max_len || window.len() == 1);

                    if i + 1 < windows.len() {
                        let extended = span(&props[window.start..=window.end]);
                        assert!(extended > max_len, "window {:?} could grow", window);
                    }
                }
            }
        }
    }

    #[test]
    fn test_pollers_strictly_increasing() {
        for props in sample_lists() {
            let group = group(props);
            let pollers = Partitioner::new(16).split(&group);
            for pair in pollers.windows(2) {
                assert!(pair[0].start < pair[1].start);
            }
        }
    }
}
