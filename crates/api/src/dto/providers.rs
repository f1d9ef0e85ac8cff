use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct ProvidersResponse {
    pub providers: Vec<String>,
}
