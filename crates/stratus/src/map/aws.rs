//! The AWS resource generator.

use stratus_core::CloudProvider;

use super::ResourceGenerator;

/// Tokens AWS spells in branded casing.
const ACRONYMS: &[(&str, &str)] = &[
    ("vpc", "VPC"),
    ("ec2", "EC2"),
    ("rds", "RDS"),
    ("s3", "S3"),
    ("sqs", "SQS"),
    ("sns", "SNS"),
    ("ecs", "ECS"),
    ("eks", "EKS"),
    ("nat", "NAT"),
    ("api", "API"),
    ("dynamodb", "DynamoDB"),
    ("elasticache", "ElastiCache"),
    ("cloudfront", "CloudFront"),
];

/// Generator producing AWS-flavored resources.
#[derive(Debug, Default)]
pub struct AwsGenerator;

impl ResourceGenerator for AwsGenerator {
    fn provider(&self) -> CloudProvider {
        CloudProvider::Aws
    }

    fn acronyms(&self) -> &'static [(&'static str, &'static str)] {
        ACRONYMS
    }
}
