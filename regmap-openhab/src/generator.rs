//! Walks a resolved site and renders its things and items files in memory.

use regmap_catalog::Property;
use tracing::{debug, info};

use crate::partition::{Partitioner, Poller};
use crate::plan::{DevicePlan, FilePlan, SitePlan, SlavePlan};
use crate::render::{BlockWriter, DataThing, GroupItem, NumberItem, PollerBridge, TcpBridge};

/// Header of every items file.
const ITEMS_HEADER: &str = "Group gModbus (gInfluxDB)\n\n";

/// Rendered contents of one file group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub name: String,
    pub disabled: bool,
    pub things: String,
    pub items: String,
}

/// Renders resolved sites into openHAB Modbus binding files.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    partitioner: Partitioner,
}

impl Generator {
    pub fn new(partitioner: Partitioner) -> Self {
        Self { partitioner }
    }

    /// Render every file group of the site.
    pub fn render(&self, site: &SitePlan<'_>) -> Vec<Artifacts> {
        site.files.iter().map(|file| self.render_file(file)).collect()
    }

    /// Render one file group.
    ///
    /// Ignored masters are skipped; they only feed the task generator.
    pub fn render_file(&self, file: &FilePlan<'_>) -> Artifacts {
        let mut things = String::new();
        let mut items = String::from(ITEMS_HEADER);
        let mut stats = Stats::default();

        for master in &file.masters {
            if master.master.ignore {
                debug!(file = file.name, master = %master.prefix, "Skipping ignored master");
                continue;
            }

            let mut writer = BlockWriter::new(&mut things);
            for slave in &master.slaves {
                let bridge = TcpBridge {
                    id: &slave.prefix,
                    label: &slave.bridge_label,
                    host: &master.master.host,
                    unit_id: slave.unit_id,
                };

                writer.block(bridge, |writer| {
                    for device in &slave.devices {
                        self.render_device(slave, device, writer, &mut items, &mut stats);
                    }
                });
            }
        }

        info!(
            file = file.name,
            disabled = file.disabled,
            devices = stats.devices,
            pollers = stats.pollers,
            properties = stats.properties,
            "Rendered file group"
        );

        Artifacts {
            name: file.name.to_string(),
            disabled: file.disabled,
            things,
            items,
        }
    }

    fn render_device(
        &self,
        slave: &SlavePlan<'_>,
        device: &DevicePlan<'_>,
        things: &mut BlockWriter<'_>,
        items: &mut String,
        stats: &mut Stats,
    ) {
        let kind = &device.device.kind;
        let group_label = device.group_label();

        let mut item_lines = BlockWriter::new(items);
        item_lines.line(GroupItem {
            id: &device.group_id,
            label: &group_label,
            icon: kind.icon(),
            location: &device.device.location,
            tags: kind.tags(),
        });

        for group in kind.property_groups() {
            for poller in self.partitioner.split(group) {
                let bridge_id = format!("{}_{}", device.prefix, poller.id);
                let label = format!("{}: {}", device.display_name, poller.display_name);
                let bridge = PollerBridge {
                    id: &bridge_id,
                    label: &label,
                    start: poller.start + device.device.offset,
                    length: poller.length + group.offset,
                    kind: group.poll_kind,
                };

                things.block(bridge, |things| {
                    for property in poller.properties {
                        let target = Target {
                            slave,
                            device,
                            poller: &poller,
                            bridge_id: &bridge_id,
                            group_offset: group.offset,
                        };
                        target.render(property, things, &mut item_lines);
                    }
                });

                stats.pollers += 1;
                stats.properties += poller.properties.len();
            }
        }

        item_lines.line("");
        stats.devices += 1;
    }
}

/// Where a property lands: its device, poller and group offset.
struct Target<'p, 'a> {
    slave: &'p SlavePlan<'a>,
    device: &'p DevicePlan<'a>,
    poller: &'p Poller<'p>,
    bridge_id: &'p str,
    group_offset: u32,
}

impl Target<'_, '_> {
    fn render(&self, property: &Property, things: &mut BlockWriter<'_>, items: &mut BlockWriter<'_>) {
        let device = self.device.device;
        let id = self.device.property_id(&property.id);
        let label = format!("{}: {}", self.device.display_name, property.display_name);
        let transforms = property.value_type.transforms();
        let value_type = property.value_type.wire_encoding();

        things.line(DataThing {
            id: &id,
            label: &label,
            location: &device.location,
            read_start: property.address + device.offset + self.group_offset,
            value_type: &value_type,
            transforms: &transforms,
        });

        let format = property.format_string();
        let gain = property.gain_string();
        items.line(NumberItem {
            id: &id,
            label: &label,
            quantity: property.quantity.as_ref().map(|q| q.as_str()),
            format: &format,
            icon: &property.icon,
            group_id: &self.device.group_id,
            semantic_tag: property.quantity.and_then(|q| q.semantic_tag()),
            tcp_bridge_id: &self.slave.prefix,
            poller_id: self.bridge_id,
            gain: &gain,
            location: &device.location,
        });

        debug!(item = %id, poller = %self.poller.id, "Rendered property");
    }
}

#[derive(Debug, Default)]
struct Stats {
    devices: usize,
    pollers: usize,
    properties: usize,
}
