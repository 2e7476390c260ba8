//! Resource graph construction.
//!
//! [`GraphBuilder`] owns the resource map and exposes insert-if-absent as
//! its only mutation primitive: resource identity is first-writer-wins, so
//! the build steps run as a single linear pass yet stay idempotent.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::{AgentRecord, NormalizedPattern};
use crate::pattern::{DeclaredProperty, PatternRecord};

use super::{PropertyMap, ResourceGraph};

static UNSAFE_ID_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("valid id regex"));

/// Sanitize a display name into a resource-identifier fragment.
pub fn safe_id(base: &str) -> String {
    UNSAFE_ID_CHARS
        .replace_all(&base.trim().to_lowercase(), "_")
        .into_owned()
}

/// Qualify an identifier fragment into the instance namespace.
fn ex(key: &str) -> String {
    format!("ex:{key}")
}

/// Accumulates resources for one graph.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: ResourceGraph,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: ResourceGraph::new(),
        }
    }

    /// Insert a resource unless the identifier is already taken. Returns
    /// whether the resource was written.
    pub fn insert_if_absent(&mut self, id: String, properties: PropertyMap) -> bool {
        if self.graph.resources.contains_key(&id) {
            return false;
        }
        self.graph.resources.insert(id, properties);
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.graph.resources.contains_key(id)
    }

    pub fn finish(self) -> ResourceGraph {
        self.graph
    }

    /// Add an agent resource plus its unconditional Goal and Task
    /// companions, identified as `goal_<id>` / `task_<id>`.
    pub fn add_agent(&mut self, agent: &AgentRecord) {
        let aid = if agent.id.is_empty() {
            let seed = if !agent.agent_id.is_empty() {
                agent.agent_id.as_str()
            } else if !agent.title.is_empty() {
                agent.title.as_str()
            } else {
                "agent"
            };
            safe_id(seed)
        } else {
            agent.id.clone()
        };
        let agent_id = if agent.agent_id.is_empty() {
            aid.clone()
        } else {
            agent.agent_id.clone()
        };

        let mut props = PropertyMap::new();
        props.insert("rdf:type".to_string(), ":Agent".to_string());
        props.insert(":agentID".to_string(), agent_id.clone());
        if !agent.role.is_empty() {
            props.insert(":agentRole".to_string(), agent.role.clone());
        }
        if !agent.title.is_empty() {
            props.insert("dcterms:title".to_string(), agent.title.clone());
        }
        if !agent.description.is_empty() {
            props.insert("dcterms:description".to_string(), agent.description.clone());
        }
        if let Some(system) = &agent.part_of_system {
            props.insert(":partOfSystem".to_string(), ex(system));
        }
        if let Some(model) = &agent.configured_by {
            props.insert(":configuredBy".to_string(), ex(model));
        }
        let goal_id = format!("goal_{aid}");
        let task_id = format!("task_{aid}");
        props.insert(":hasGoal".to_string(), ex(&goal_id));
        props.insert(":hasTask".to_string(), ex(&task_id));
        self.insert_if_absent(ex(&aid), props);

        let mut goal = PropertyMap::new();
        goal.insert("rdf:type".to_string(), ":Goal".to_string());
        goal.insert("dcterms:title".to_string(), format!("Goal for {agent_id}"));
        goal.insert(
            "dcterms:description".to_string(),
            format!("Automatically generated goal for {agent_id}"),
        );
        self.insert_if_absent(ex(&goal_id), goal);

        let mut task = PropertyMap::new();
        task.insert("rdf:type".to_string(), ":Task".to_string());
        task.insert("dcterms:title".to_string(), format!("Task for {agent_id}"));
        task.insert(
            "dcterms:description".to_string(),
            format!("Automatically generated task for {agent_id}"),
        );
        task.insert(
            ":taskExpectedOutput".to_string(),
            format!("Automatically generated expected output for {agent_id}"),
        );
        self.insert_if_absent(ex(&task_id), task);
    }
}

/// Build the resource graph for one artifact: the normalized pattern drives
/// steps 1-5, the parsed document contributes ontology adjustments and the
/// raw-entity fallback.
pub fn build_graph(normalized: &NormalizedPattern, record: &PatternRecord) -> ResourceGraph {
    let mut builder = GraphBuilder::new();

    // 1. Agents, each with auto-generated goal/task companions.
    for agent in normalized.agents() {
        builder.add_agent(agent);
    }

    // 2. Systems, backfilling nested agents not seen in step 1.
    for system in normalized.systems() {
        let sid = if system.id.is_empty() {
            safe_id(if system.title.is_empty() {
                "system"
            } else {
                &system.title
            })
        } else {
            system.id.clone()
        };
        let rdf_type = if system.declared_type.to_lowercase().ends_with("system") {
            ":System"
        } else {
            ":WorkflowPattern"
        };
        let mut props = PropertyMap::new();
        props.insert("rdf:type".to_string(), rdf_type.to_string());
        if !system.title.is_empty() {
            props.insert("dcterms:title".to_string(), system.title.clone());
        }
        if !system.description.is_empty() {
            props.insert("dcterms:description".to_string(), system.description.clone());
        }
        builder.insert_if_absent(ex(&sid), props);

        for member in &system.agents {
            if !builder.contains(&ex(member)) {
                builder.add_agent(&AgentRecord {
                    id: member.clone(),
                    agent_id: member.clone(),
                    title: member.clone(),
                    ..AgentRecord::default()
                });
            }
        }
    }

    // 3. Workflow patterns.
    for workflow in normalized.workflows() {
        let wid = if workflow.id.is_empty() {
            safe_id(if workflow.title.is_empty() {
                "workflow"
            } else {
                &workflow.title
            })
        } else {
            workflow.id.clone()
        };
        let mut props = PropertyMap::new();
        props.insert("rdf:type".to_string(), ":WorkflowPattern".to_string());
        if !workflow.title.is_empty() {
            props.insert("dcterms:title".to_string(), workflow.title.clone());
        }
        if !workflow.description.is_empty() {
            props.insert(
                "dcterms:description".to_string(),
                workflow.description.clone(),
            );
        }
        builder.insert_if_absent(ex(&wid), props);
    }

    // 4. Graph nodes.
    for node in normalized.nodes() {
        let nid = if node.id.is_empty() {
            safe_id(node.node_name.as_deref().unwrap_or("node"))
        } else {
            node.id.clone()
        };
        let mut props = PropertyMap::new();
        props.insert("rdf:type".to_string(), ":Node".to_string());
        if let Some(name) = &node.node_name {
            props.insert("dcterms:title".to_string(), name.clone());
        }
        if let Some(label) = &node.callable_label {
            props.insert(":callableLabel".to_string(), label.clone());
        }
        builder.insert_if_absent(ex(&nid), props);
    }

    // 5. Language models.
    for model in normalized.models() {
        let mid = if model.id.is_empty() {
            safe_id(if model.model_name.is_empty() {
                "llm"
            } else {
                &model.model_name
            })
        } else {
            model.id.clone()
        };
        let mut props = PropertyMap::new();
        props.insert("rdf:type".to_string(), ":LanguageModel".to_string());
        props.insert(
            "dcterms:title".to_string(),
            if model.model_name.is_empty() {
                mid.clone()
            } else {
                model.model_name.clone()
            },
        );
        builder.insert_if_absent(ex(&mid), props);
    }

    // 6. Ontology adjustments, independent of which normalizer ran.
    for property in record
        .adjustments
        .datatype_properties
        .iter()
        .chain(&record.adjustments.optional_properties)
    {
        add_datatype_property(&mut builder, property);
    }
    for class in &record.adjustments.new_classes {
        let cid = safe_id(if class.name.is_empty() {
            "class"
        } else {
            &class.name
        });
        let mut props = PropertyMap::new();
        props.insert("rdf:type".to_string(), "owl:Class".to_string());
        props.insert("dcterms:title".to_string(), class.name.clone());
        props.insert("dcterms:description".to_string(), class.definition.clone());
        builder.insert_if_absent(ex(&cid), props);
    }

    // 7. Fallback: when no agents were normalized but the raw entities
    // still look agent-like, synthesize agents from them.
    if normalized.agents().is_empty() {
        for entity in &record.entities {
            let vc = entity.vendor_class.to_lowercase();
            if !(vc.contains("agent") || vc.contains("assistant") || vc.contains("userproxy")) {
                continue;
            }
            let name = entity
                .attr_any(&["name"])
                .unwrap_or(&entity.id)
                .to_string();
            let seed = if name.is_empty() {
                if entity.id.is_empty() {
                    "agent".to_string()
                } else {
                    entity.id.clone()
                }
            } else {
                name.clone()
            };
            if builder.contains(&ex(&safe_id(&seed))) {
                continue;
            }
            builder.add_agent(&AgentRecord {
                id: safe_id(&seed),
                agent_id: if name.is_empty() {
                    entity.id.clone()
                } else {
                    name.clone()
                },
                role: entity
                    .attr_any(&["role"])
                    .map(str::to_string)
                    .unwrap_or_else(|| capitalize(&vc)),
                title: seed,
                description: entity
                    .attr_any(&["system_message", "systemMessage", "instructions"])
                    .unwrap_or("")
                    .to_string(),
                ..AgentRecord::default()
            });
        }
    }

    builder.finish()
}

fn add_datatype_property(builder: &mut GraphBuilder, property: &DeclaredProperty) {
    let rid = safe_id(&property.name);
    let mut props = PropertyMap::new();
    props.insert("rdf:type".to_string(), "agento:DatatypeProperty".to_string());
    props.insert("agento:domain".to_string(), property.domain.clone());
    props.insert(
        "agento:justification".to_string(),
        property.justification.clone(),
    );
    props.insert("agento:name".to_string(), property.name.clone());
    props.insert("agento:range".to_string(), property.range.clone());
    builder.insert_if_absent(ex(&format!("DatatypeProperty_{rid}")), props);
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
