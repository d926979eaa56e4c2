//! Example: Compiling a small diagram end to end
//!
//! This example demonstrates how to compile an IR payload into a scheduled
//! architecture and inspect the result, without going through the CLI.

use stratus::{CloudProvider, CompileRequest, Compiler, config::CompilerConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let payload = br#"{
        "nodes": [
            {"id": "region-1", "data": {"resourceType": "region", "label": "eu-central-1"}},
            {"id": "vpc-1", "parentId": "region-1",
             "data": {"resourceType": "vpc", "label": "Main VPC"}},
            {"id": "subnet-1", "parentId": "vpc-1",
             "data": {"resourceType": "subnet", "label": "Private Subnet"}},
            {"id": "sg-1", "parentId": "vpc-1",
             "data": {"resourceType": "security_group", "label": "App SG"}},
            {"id": "ec2-1", "parentId": "subnet-1",
             "data": {"resourceType": "ec2", "label": "App Server"}},
            {"id": "note-1", "data": {"resourceType": "note", "isVisualOnly": true,
             "label": "Reviewed 2025-06"}}
        ],
        "edges": [
            {"source": "ec2-1", "target": "sg-1", "kind": "dependency"}
        ]
    }"#;

    println!("Compiling diagram for AWS...\n");

    let compiler = Compiler::new(&CompilerConfig::default());
    let request = CompileRequest::new(CloudProvider::Aws, "eu-central-1");
    let compilation = compiler.compile(payload, &request)?;

    let architecture = compilation.architecture();
    println!("Architecture:");
    println!("  Provider: {}", architecture.provider());
    println!("  Region: {}", architecture.region());
    println!("  Resources: {}", architecture.resources().len());
    println!("  Annotations: {}", architecture.annotations().len());
    println!();

    println!("Creation order:");
    for (step, id) in compilation.order().iter().enumerate() {
        let resource = architecture
            .resource(id)
            .expect("scheduled ids are resources");
        println!("  {}. {} ({})", step + 1, id, resource.resource_type());
    }
    println!();

    for warning in compilation.validation().warnings() {
        println!("warning: {}", warning.message());
    }

    // The full plan serializes for downstream consumers.
    let plan = serde_json::json!({
        "architecture": architecture,
        "order": compilation.order(),
    });
    println!("Plan JSON: {} bytes", plan.to_string().len());

    Ok(())
}
