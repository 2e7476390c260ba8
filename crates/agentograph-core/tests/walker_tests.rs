//! End-to-end tests for source-based extraction.

use agentograph_core::{Framework, Pipeline};

#[test]
fn test_autogen_source_extraction() {
    let source = r#"
"""Two agents play chess against each other."""
import autogen

player = autogen.AssistantAgent(
    name="chess_player",
    system_message="You are a chess player.",
)
user = autogen.UserProxyAgent(name="user", human_input_mode="NEVER")
"#;
    let graph = Pipeline::new()
        .extract_source(Framework::Autogen, "chess_game.py", source)
        .unwrap();

    assert!(graph.resources.contains_key("ex:assistant"));
    assert!(graph.resources.contains_key("ex:userproxy"));
    assert_eq!(
        graph.resources["ex:assistant"]["dcterms:description"],
        "You are a chess player."
    );
    assert!(graph.resources.contains_key("ex:goal_assistant"));
    assert!(graph.resources.contains_key("ex:task_userproxy"));
}

#[test]
fn test_crewai_source_extraction() {
    let source = r#"
"""A crew that writes blog posts."""
from crewai import Agent, Task, Crew

researcher = Agent(role="researcher", goal="Research topics", backstory="Thorough.")
writer = Agent(role="writer", goal="Write posts", backstory="Creative.")
crew = Crew(agents=[researcher, writer], tasks=[], process="sequential")
"#;
    let graph = Pipeline::new()
        .extract_source(Framework::CrewAi, "blog_crew.py", source)
        .unwrap();

    // The crew entity becomes a system; its member list expands into
    // agents with goal/task companions.
    assert_eq!(graph.resources["ex:crew"]["rdf:type"], ":System");
    assert!(graph.resources.contains_key("ex:researcher"));
    assert!(graph.resources.contains_key("ex:writer"));
    assert!(graph.resources.contains_key("ex:goal_writer"));
}

#[test]
fn test_langgraph_source_extraction() {
    let source = r#"
"""A two-step research graph."""
from langgraph.graph import StateGraph

graph = StateGraph(ResearchState)
graph.add_node("research", run_research)
graph.add_node("summarize", summarize)
"#;
    let graph = Pipeline::new()
        .extract_source(Framework::LangGraph, "research_graph.py", source)
        .unwrap();

    let node = &graph.resources["ex:research_node"];
    assert_eq!(node["rdf:type"], ":Node");
    assert_eq!(node["dcterms:title"], "research");
    assert_eq!(node[":callableLabel"], "run_research");
    assert!(graph.resources.contains_key("ex:summarize_node"));
    assert!(graph
        .resources
        .values()
        .any(|p| p.get("rdf:type").map(String::as_str) == Some(":WorkflowPattern")));
}

#[test]
fn test_mastra_typescript_extraction() {
    let source = r#"
import { Agent } from "@mastra/core/agent";
import { openai } from "@ai-sdk/openai";

export const weatherAgent = new Agent({
  name: "Weather Agent",
  instructions: "You provide accurate weather information.",
  model: openai("gpt-4o-mini"),
});
"#;
    let graph = Pipeline::new()
        .extract_source(Framework::MastraAi, "weather-agent.ts", source)
        .unwrap();

    let agent = &graph.resources["ex:weather_agent"];
    assert_eq!(agent[":agentID"], "Weather Agent");
    assert_eq!(
        agent["dcterms:description"],
        "You provide accurate weather information."
    );
    assert_eq!(agent[":configuredBy"], "ex:llm_gpt-4o-mini");
    assert_eq!(
        graph.resources["ex:llm_gpt-4o-mini"]["rdf:type"],
        ":LanguageModel"
    );
    assert!(graph.resources.contains_key("ex:goal_weather_agent"));
}

#[test]
fn test_mastra_yaml_extraction() {
    let source = "\
name: Support Service
description: Handles support tickets.
agents:
  - name: triage
    role: Triage
    instructions: Sort incoming tickets
";
    let graph = Pipeline::new()
        .extract_source(Framework::MastraAi, "support.yaml", source)
        .unwrap();

    assert_eq!(
        graph.resources["ex:support_service"]["dcterms:title"],
        "Support Service"
    );
    let agent = &graph.resources["ex:triage"];
    assert_eq!(agent[":agentRole"], "Triage");
    assert_eq!(agent[":partOfSystem"], "ex:support_service");
}

#[test]
fn test_unparseable_source_yields_no_agents() {
    let graph = Pipeline::new()
        .extract_source(Framework::Autogen, "broken.py", "def (((:")
        .unwrap();
    // No entities were recovered, so no agent resources exist; the
    // framework's single workflow record is still emitted.
    assert!(graph
        .resources
        .values()
        .all(|p| p.get("rdf:type").map(String::as_str) != Some(":Agent")));
    assert!(graph.resources.contains_key("ex:broken_workflow"));
}
