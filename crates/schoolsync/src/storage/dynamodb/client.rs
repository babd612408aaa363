//! AWS SDK client setup.

use aws_sdk_dynamodb::Client;
use schoolsync_core::storage::StoreError;

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local DynamoDB).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl Default for AwsConfig {
    fn default() -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: std::env::var("AWS_REGION").unwrap_or_else(|_| "ap-southeast-1".to_string()),
        }
    }
}

impl AwsConfig {
    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}

/// Creates a DynamoDB client with the given configuration.
///
/// Credentials come from the SDK default chain.
pub async fn create_client(config: &AwsConfig) -> Client {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}

/// Returns true when the table exists, false when the backend reports it
/// missing. Any other failure is a connectivity problem.
pub async fn table_exists(client: &Client, table_name: &str) -> Result<bool, StoreError> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(_) => Ok(true),
        Err(err) => {
            let service_error = err.into_service_error();
            if service_error.is_resource_not_found_exception() {
                Ok(false)
            } else {
                Err(StoreError::Connectivity(service_error.to_string()))
            }
        }
    }
}

/// Lists the table names visible to the configured endpoint and region.
pub async fn list_tables(client: &Client) -> Result<Vec<String>, StoreError> {
    let result = client
        .list_tables()
        .send()
        .await
        .map_err(|err| StoreError::Connectivity(err.to_string()))?;

    Ok(result.table_names.unwrap_or_default())
}
