//! Plain-text report for terminals.

use std::io::{self, Write};

use archmetrics_core::{Analysis, MetricRegistry, MetricValues};

const SEPARATOR: &str =
    "--------------------------------------------------------------------";

/// Renders an [`Analysis`] as titled sections of percentages.
pub struct ConsoleReport<'a> {
    analysis: &'a Analysis,
    registry: &'a MetricRegistry,
    precision: usize,
}

impl<'a> ConsoleReport<'a> {
    pub fn new(analysis: &'a Analysis, registry: &'a MetricRegistry, precision: usize) -> Self {
        Self {
            analysis,
            registry,
            precision,
        }
    }

    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out)?;
        self.write_global(out)?;
        self.write_groups(out)?;
        self.write_entities(out)
    }

    fn write_global(&self, out: &mut dyn Write) -> io::Result<()> {
        let global = self.analysis.metrics.global();
        if global.is_empty() {
            return Ok(());
        }

        title(out, "Global Metrics")?;
        self.write_values(out, global)?;
        writeln!(out)
    }

    fn write_groups(&self, out: &mut dyn Write) -> io::Result<()> {
        let mut groups = self.analysis.metrics.groups().peekable();
        if groups.peek().is_none() {
            return Ok(());
        }

        title(out, "Groups of Entities")?;
        for (kind, values) in groups {
            heading(out, kind.group_name())?;
            self.write_values(out, values)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_entities(&self, out: &mut dyn Write) -> io::Result<()> {
        let mut entities = self.analysis.metrics.entities().peekable();
        if entities.peek().is_none() {
            return Ok(());
        }

        let graph = &self.analysis.graph;
        title(out, "Entity Metrics")?;
        for (id, values) in entities {
            let Some(index) = graph.find(id) else {
                continue;
            };
            let node = &graph[index];
            let mut name = format!("{} \"{}\"", node.kind(), node.name);
            if let Some(parent) = graph.parent_container(index) {
                name.push_str(&format!(" (children of \"{}\")", graph[parent].name));
            }

            heading(out, &name)?;
            self.write_values(out, values)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn write_values(&self, out: &mut dyn Write, values: &MetricValues) -> io::Result<()> {
        for (id, value) in values {
            let name = self.registry.get(id).map_or(*id, |metric| metric.name());
            writeln!(out, "- {}: {}", name, format_percent(*value, self.precision))?;
        }
        Ok(())
    }
}

fn title(out: &mut dyn Write, name: &str) -> io::Result<()> {
    let main = format!("# {} #", name);
    let border = "#".repeat(main.len());
    writeln!(out, "{}", border)?;
    writeln!(out, "{}", main)?;
    writeln!(out, "{}", border)?;
    writeln!(out)
}

fn heading(out: &mut dyn Write, name: &str) -> io::Result<()> {
    writeln!(out, "{}", name)?;
    writeln!(out, "{}", SEPARATOR)
}

/// A unit-range score as a percentage, e.g. `0.5` as `50.00%`.
pub fn format_percent(value: f64, precision: usize) -> String {
    format!("{:.*}%", precision, value * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use archmetrics_core::protocol::{CodeEntity, FileEntity};
    use archmetrics_core::{analyse_architecture, Config, EntityKind, Protocol, RelationKind};

    fn sample_analysis() -> Analysis {
        let mut protocol = Protocol::new();
        protocol
            .push_file(FileEntity::new("f", "src/shapes.ts"))
            .push_entity(EntityKind::Class, CodeEntity::new("a", "Shape", "f"))
            .push_entity(EntityKind::FunctionVariable, CodeEntity::new("v", "draw", "f"))
            .push_relation("a", RelationKind::ChildrenOf, "f")
            .push_relation("v", RelationKind::ChildrenOf, "f")
            .push_relation("a", RelationKind::UsedBy, "v");
        analyse_architecture(&protocol, &Config::default()).unwrap()
    }

    fn render(analysis: &Analysis) -> String {
        let registry = MetricRegistry::builtin();
        let mut out = Vec::new();
        ConsoleReport::new(analysis, &registry, 2)
            .write_to(&mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5, 2), "50.00%");
        assert_eq!(format_percent(1.0, 0), "100%");
        assert_eq!(format_percent(2.0 / 3.0, 1), "66.7%");
    }

    #[test]
    fn test_entity_section() {
        let output = render(&sample_analysis());

        assert!(output.contains("##################\n# Entity Metrics #\n##################\n"));
        assert!(output.contains("File \"shapes.ts\"\n----"));
        assert!(output.contains("Class \"Shape\" (children of \"shapes.ts\")\n"));
        assert!(output.contains("Function Variable \"draw\" (children of \"shapes.ts\")\n"));
        assert!(output.contains("- Module Cohesion: 100.00%\n"));
        assert!(output.contains("- LCOM: 100.00%\n"));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let output = render(&sample_analysis());
        assert!(!output.contains("Global Metrics"));
        assert!(!output.contains("Groups of Entities"));
    }

    #[test]
    fn test_values_in_metric_order() {
        let output = render(&sample_analysis());
        let class = output
            .split("Class \"Shape\"")
            .nth(1)
            .unwrap()
            .split("\n\n")
            .next()
            .unwrap();
        let names: Vec<_> = class
            .lines()
            .filter_map(|line| line.strip_prefix("- "))
            .map(|line| line.split(':').next().unwrap())
            .collect();
        assert_eq!(names, ["Instability", "LCOM", "Modularity"]);
    }
}
