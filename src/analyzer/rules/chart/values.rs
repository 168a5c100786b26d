//! HC3xx - values.yaml rules
//!
//! Validates the bjw-s common library layout of values.yaml: controllers
//! with containers, services, ingresses and persistence entries.

use crate::analyzer::document::chart::VALUES_FILE;
use crate::analyzer::document::{ChartFile, Document, Node, NodePath, StructuredDocument};
use crate::analyzer::rules::{
    Findings, Rule, RuleFault, mapping_entries, mapping_or_empty, sequence_items, simple_rule,
};
use crate::analyzer::types::{Diagnostic, DocumentKind, Location, Severity};

pub const GROUP: &str = "values";

const PROBE_KINDS: [&str; 3] = ["liveness", "readiness", "startup"];
const DEFAULT_PERSISTENCE_TYPE: &str = "persistentVolumeClaim";

/// Get all HC3xx rules.
pub fn rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(
            simple_rule(
                "HC301",
                "values-file",
                DocumentKind::Chart,
                "values.yaml must exist, be valid YAML and not be empty",
                check_values_file,
            )
            .in_group(GROUP),
        ),
        Box::new(
            simple_rule(
                "HC302",
                "controllers",
                DocumentKind::Chart,
                "values.yaml must define at least one controller",
                check_controllers,
            )
            .in_group(GROUP),
        ),
        Box::new(
            simple_rule(
                "HC303",
                "containers",
                DocumentKind::Chart,
                "Controllers need containers with a pinned image",
                check_containers,
            )
            .in_group(GROUP),
        ),
        Box::new(
            simple_rule(
                "HC304",
                "services",
                DocumentKind::Chart,
                "Services must reference a controller and expose ports",
                check_services,
            )
            .in_group(GROUP),
        ),
        Box::new(
            simple_rule(
                "HC305",
                "ingress",
                DocumentKind::Chart,
                "Enabled ingresses need hosts and resolvable service references",
                check_ingress,
            )
            .in_group(GROUP),
        ),
        Box::new(
            simple_rule(
                "HC306",
                "persistence",
                DocumentKind::Chart,
                "Persistent volume claims need a size",
                check_persistence,
            )
            .in_group(GROUP),
        ),
    ]
}

fn file_location() -> Location {
    Location::File(VALUES_FILE.to_string())
}

fn at(path: &NodePath) -> Location {
    Location::Path(path.to_string())
}

fn values(doc: &Document) -> Result<Option<&StructuredDocument>, RuleFault> {
    Ok(match doc.chart()?.values() {
        ChartFile::Loaded(tree) => Some(tree),
        _ => None,
    })
}

/// Whether an entry with an `enabled` switch is on. Absent means enabled.
fn is_enabled(node: &Node) -> bool {
    node.get("enabled").is_none_or(Node::is_truthy)
}

/// HC301: values.yaml present, parseable and non-empty
fn check_values_file(doc: &Document) -> Result<Findings, RuleFault> {
    let diagnostic = match doc.chart()?.values() {
        ChartFile::Missing => Diagnostic::new("HC301", Severity::Error, file_location(), "values.yaml not found")
            .with_suggestion("Create values.yaml with chart configuration"),
        ChartFile::Invalid(e) => {
            Diagnostic::new("HC301", Severity::Error, file_location(), format!("Invalid YAML: {}", e))
                .with_suggestion("Fix YAML syntax errors")
        }
        ChartFile::Empty => Diagnostic::new("HC301", Severity::Error, file_location(), "values.yaml is empty")
            .with_suggestion("Add controller configuration"),
        ChartFile::Loaded(_) => return Ok(Findings::none()),
    };
    Ok(Findings::halt(vec![diagnostic]))
}

/// HC302: at least one controller
fn check_controllers(doc: &Document) -> Result<Findings, RuleFault> {
    let Some(values) = values(doc)? else {
        return Ok(Findings::none());
    };

    let message = match values.get("controllers") {
        None => "No controllers defined",
        Some(controllers) if !controllers.is_truthy() => "Controllers section is empty",
        Some(_) => return Ok(Findings::none()),
    };

    Ok(Findings::halt(vec![
        Diagnostic::new("HC302", Severity::Error, file_location(), message)
            .with_suggestion("Add at least one controller"),
    ]))
}

/// HC303: containers, images and probes of every controller
fn check_containers(doc: &Document) -> Result<Findings, RuleFault> {
    let Some(values) = values(doc)? else {
        return Ok(Findings::none());
    };
    let Some(controllers) = values.get("controllers").filter(|c| c.is_truthy()) else {
        return Ok(Findings::none());
    };

    let mut found = Vec::new();
    let root = NodePath::root().key("controllers");

    for (name, controller) in mapping_entries(Some(controllers), &root)? {
        let path = root.key(name);
        let error = |message: &str, suggestion: &str| {
            Diagnostic::new("HC303", Severity::Error, at(&path), message).with_suggestion(suggestion)
        };

        if !controller.is_truthy() {
            found.push(error("Controller configuration is empty", "Add container definitions"));
            continue;
        }
        mapping_or_empty(controller, &path)?;

        let containers = match controller.get("containers") {
            None => {
                found.push(error("No containers defined", "Add at least one container"));
                continue;
            }
            Some(c) if !c.is_truthy() => {
                found.push(error("Containers section is empty", "Add at least one container"));
                continue;
            }
            Some(c) => c,
        };

        let containers_path = path.key("containers");
        for (container_name, container) in mapping_entries(Some(containers), &containers_path)? {
            check_container(&containers_path.key(container_name), container, &mut found)?;
        }
    }

    Ok(found.into())
}

fn check_container(path: &NodePath, container: &Node, found: &mut Vec<Diagnostic>) -> Result<(), RuleFault> {
    if !container.is_truthy() {
        found.push(
            Diagnostic::new("HC303", Severity::Error, at(path), "Container configuration is empty")
                .with_suggestion("Add image configuration"),
        );
        return Ok(());
    }
    mapping_or_empty(container, path)?;

    match container.get("image") {
        None => found.push(
            Diagnostic::new("HC303", Severity::Error, at(path), "No image defined")
                .with_suggestion("Add image.repository and image.tag"),
        ),
        Some(image) => {
            let image_path = path.key("image");
            // A scalar image (`image: nginx:1.25`) has neither field.
            let field = |key: &str| image.get(key);

            if field("repository").is_none() {
                found.push(
                    Diagnostic::new("HC303", Severity::Error, at(&image_path), "Missing image repository")
                        .with_suggestion("Add image.repository"),
                );
            }
            match field("tag") {
                None => found.push(
                    Diagnostic::new("HC303", Severity::Warning, at(&image_path), "Missing image tag")
                        .with_suggestion("Add explicit image.tag (avoid :latest)"),
                ),
                Some(tag) if tag.as_str() == Some("latest") => found.push(
                    Diagnostic::new("HC303", Severity::Warning, at(&image_path), "Using :latest tag")
                        .with_suggestion("Use specific version tag for reproducibility"),
                ),
                Some(_) => {}
            }
        }
    }

    let probes_path = path.key("probes");
    let Some(probes) = container.get("probes") else {
        return Ok(());
    };
    let Some(probes) = mapping_or_empty(probes, &probes_path)? else {
        return Ok(());
    };
    for kind in PROBE_KINDS {
        let Some(probe) = probes.get(kind) else {
            continue;
        };
        let probe_path = probes_path.key(kind);
        mapping_or_empty(probe, &probe_path)?;

        let enabled = probe.get("enabled").is_some_and(Node::is_truthy);
        let custom = probe.get("custom").is_some_and(Node::is_truthy);
        if enabled && !custom && !probe.contains_key("type") {
            found.push(
                Diagnostic::new("HC303", Severity::Info, at(&probe_path), "Probe type not specified")
                    .with_suggestion("Add type: HTTP, TCP, or EXEC"),
            );
        }
    }

    Ok(())
}

/// HC304: services reference a controller and expose ports
fn check_services(doc: &Document) -> Result<Findings, RuleFault> {
    let Some(values) = values(doc)? else {
        return Ok(Findings::none());
    };

    let mut found = Vec::new();
    let root = NodePath::root().key("service");

    for (name, service) in mapping_entries(values.get("service"), &root)? {
        let path = root.key(name);
        mapping_or_empty(service, &path)?;

        if !service.contains_key("controller") {
            found.push(
                Diagnostic::new("HC304", Severity::Error, at(&path), "Service does not reference a controller")
                    .with_suggestion("Add controller: <controller-name>"),
            );
        }
        if !service.get("ports").is_some_and(Node::is_truthy) {
            found.push(
                Diagnostic::new("HC304", Severity::Error, at(&path), "Service has no ports defined")
                    .with_suggestion("Add at least one port"),
            );
        }
    }

    Ok(found.into())
}

/// HC305: enabled ingresses have hosts; path backends name a service
fn check_ingress(doc: &Document) -> Result<Findings, RuleFault> {
    let Some(values) = values(doc)? else {
        return Ok(Findings::none());
    };

    let mut found = Vec::new();
    let root = NodePath::root().key("ingress");

    for (name, ingress) in mapping_entries(values.get("ingress"), &root)? {
        let path = root.key(name);
        mapping_or_empty(ingress, &path)?;
        if !is_enabled(ingress) {
            continue;
        }

        let hosts = match ingress.get("hosts") {
            Some(hosts) if hosts.is_truthy() => hosts,
            _ => {
                found.push(
                    Diagnostic::new("HC305", Severity::Warning, at(&path), "Ingress has no hosts defined")
                        .with_suggestion("Add hosts configuration"),
                );
                continue;
            }
        };

        let hosts_path = path.key("hosts");
        for (i, host) in sequence_items(Some(hosts), &hosts_path)?.iter().enumerate() {
            let paths_path = hosts_path.index(i).key("paths");
            for route in sequence_items(host.get("paths"), &paths_path)? {
                let Some(backend) = route.get("service") else {
                    continue;
                };
                if !backend.contains_key("identifier") && !backend.contains_key("name") {
                    found.push(
                        Diagnostic::new(
                            "HC305",
                            Severity::Error,
                            at(&path),
                            "Service reference missing identifier or name",
                        )
                        .with_suggestion("Use identifier: <service-identifier> or name: <service-name>"),
                    );
                }
            }
        }
    }

    Ok(found.into())
}

/// HC306: persistence entries
fn check_persistence(doc: &Document) -> Result<Findings, RuleFault> {
    let Some(values) = values(doc)? else {
        return Ok(Findings::none());
    };

    let mut found = Vec::new();
    let root = NodePath::root().key("persistence");

    for (name, volume) in mapping_entries(values.get("persistence"), &root)? {
        let path = root.key(name);
        mapping_or_empty(volume, &path)?;
        if !is_enabled(volume) {
            continue;
        }

        if !volume.contains_key("type") {
            found.push(
                Diagnostic::new("HC306", Severity::Info, at(&path), "Persistence type not specified")
                    .with_suggestion("Defaults to persistentVolumeClaim"),
            );
        }

        let kind = match volume.get("type") {
            None => Some(DEFAULT_PERSISTENCE_TYPE),
            Some(kind) => kind.as_str(),
        };
        if kind != Some(DEFAULT_PERSISTENCE_TYPE) || volume.contains_key("existingClaim") {
            continue;
        }

        if !volume.contains_key("size") {
            found.push(
                Diagnostic::new("HC306", Severity::Error, at(&path), "PVC has no size specified")
                    .with_suggestion("Add size: 1Gi (or use existingClaim)"),
            );
        }
        if !volume.contains_key("accessMode") {
            found.push(
                Diagnostic::new("HC306", Severity::Info, at(&path), "PVC has no accessMode specified")
                    .with_suggestion("Defaults to ReadWriteOnce"),
            );
        }
    }

    Ok(found.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::rules::chart::test_support::{CHART_YAML, chart, check_values, complete_templates, findings};

    fn rule(code: &str) -> Box<dyn Rule> {
        rules()
            .into_iter()
            .find(|r| r.code().as_str() == code)
            .unwrap()
    }

    fn messages(code: &str, values: &str) -> Vec<String> {
        check_values(rule(code).as_ref(), values)
            .iter()
            .map(|d| format!("{} {}: {}", d.severity(), d.location(), d.message()))
            .collect()
    }

    #[test]
    fn test_values_file_states() {
        let missing = chart(Some(CHART_YAML), Some(complete_templates()), None);
        let found = findings(rule("HC301").as_ref(), &missing);
        assert!(found.halt);
        assert_eq!(found.diagnostics[0].message(), "values.yaml not found");

        assert_eq!(messages("HC301", ""), vec!["error values.yaml: values.yaml is empty"]);
        assert_eq!(messages("HC301", "{}\n"), vec!["error values.yaml: values.yaml is empty"]);
        assert!(messages("HC301", "controllers: {}\n").is_empty());
    }

    #[test]
    fn test_controllers_halt() {
        let doc = chart(Some(CHART_YAML), Some(complete_templates()), Some("service: {}\n"));
        let found = findings(rule("HC302").as_ref(), &doc);
        assert!(found.halt);
        assert_eq!(found.diagnostics[0].message(), "No controllers defined");

        assert_eq!(
            messages("HC302", "controllers: {}\n"),
            vec!["error values.yaml: Controllers section is empty"]
        );
    }

    #[test]
    fn test_containers() {
        let values = r#"
controllers:
  empty:
  nocontainers:
    type: deployment
  blank:
    containers: {}
  main:
    containers:
      app:
        image:
          repository: ghcr.io/org/app
          tag: latest
        probes:
          liveness:
            enabled: true
          readiness:
            enabled: true
            custom: true
          startup:
            enabled: false
      sidecar:
        image:
          tag: "1.0"
      bare:
      noimage:
        env:
          TZ: UTC
"#;
        assert_eq!(
            messages("HC303", values),
            vec![
                "error controllers.empty: Controller configuration is empty",
                "error controllers.nocontainers: No containers defined",
                "error controllers.blank: Containers section is empty",
                "warning controllers.main.containers.app.image: Using :latest tag",
                "info controllers.main.containers.app.probes.liveness: Probe type not specified",
                "error controllers.main.containers.sidecar.image: Missing image repository",
                "error controllers.main.containers.bare: Container configuration is empty",
                "error controllers.main.containers.noimage: No image defined",
            ]
        );
    }

    #[test]
    fn test_missing_tag() {
        let values = "controllers:\n  main:\n    containers:\n      app:\n        image:\n          repository: nginx\n";
        assert_eq!(
            messages("HC303", values),
            vec!["warning controllers.main.containers.app.image: Missing image tag"]
        );
    }

    #[test]
    fn test_scalar_image_keeps_checking_other_containers() {
        let values = r#"
controllers:
  main:
    containers:
      app:
        image: nginx:1.25
  worker:
    containers:
      job:
        image:
          repository: busybox
"#;
        assert_eq!(
            messages("HC303", values),
            vec![
                "error controllers.main.containers.app.image: Missing image repository",
                "warning controllers.main.containers.app.image: Missing image tag",
                "warning controllers.worker.containers.job.image: Missing image tag",
            ]
        );
    }

    #[test]
    fn test_services() {
        let values = r#"
controllers:
  main: {}
service:
  ok:
    controller: main
    ports:
      http:
        port: 80
  orphan:
    ports: {}
"#;
        assert_eq!(
            messages("HC304", values),
            vec![
                "error service.orphan: Service does not reference a controller",
                "error service.orphan: Service has no ports defined",
            ]
        );
    }

    #[test]
    fn test_ingress() {
        let values = r#"
controllers:
  main: {}
ingress:
  internal:
    enabled: false
  nohosts:
    hosts: []
  main:
    hosts:
      - host: app.example.com
        paths:
          - path: /
            service:
              identifier: main
          - path: /api
            service:
              port: 8080
"#;
        assert_eq!(
            messages("HC305", values),
            vec![
                "warning ingress.nohosts: Ingress has no hosts defined",
                "error ingress.main: Service reference missing identifier or name",
            ]
        );
    }

    #[test]
    fn test_persistence() {
        let values = r#"
controllers:
  main: {}
persistence:
  disabled:
    enabled: false
  implicit:
    size: 1Gi
  claim:
    type: persistentVolumeClaim
    accessMode: ReadWriteOnce
  existing:
    type: persistentVolumeClaim
    existingClaim: data
  scratch:
    type: emptyDir
"#;
        assert_eq!(
            messages("HC306", values),
            vec![
                "info persistence.implicit: Persistence type not specified",
                "info persistence.implicit: PVC has no accessMode specified",
                "error persistence.claim: PVC has no size specified",
            ]
        );
    }

    #[test]
    fn test_null_persistence_type_is_not_a_claim() {
        let values = "controllers:\n  main: {}\npersistence:\n  data:\n    type: null\n";
        assert!(messages("HC306", values).is_empty());
    }

    #[test]
    fn test_non_mapping_section_is_a_fault() {
        let doc = chart(
            Some(CHART_YAML),
            Some(complete_templates()),
            Some("controllers:\n  main: {}\nservice: [a, b]\n"),
        );
        let fault = rule("HC304").check(&doc).unwrap_err();
        assert_eq!(fault.to_string(), "expected a mapping at service, found sequence");
    }
}
