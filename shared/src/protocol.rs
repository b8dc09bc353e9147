use crate::{
    AuthResponse, CreateProblemRequest, CreateProblemResponse, Credentials, Problem, SeedResponse,
    Stats,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Method used by a backend endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// One backend endpoint. The implementing type is the request body; the associated
/// items describe where it goes and what comes back.
pub trait ApiRequest: Serialize + DeserializeOwned {
    /// Body of a 2xx reply.
    type Response: Serialize + DeserializeOwned;
    /// The URL path below the `/api` prefix.
    const PATH: &'static str;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// Whether the request carries a JSON body.
    const HAS_BODY: bool = true;
    /// Whether the endpoint needs the bearer token.
    const REQUIRES_AUTH: bool = true;
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginRequest(pub Credentials);

impl ApiRequest for LoginRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/auth/login";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegisterRequest(pub Credentials);

impl ApiRequest for RegisterRequest {
    type Response = AuthResponse;
    const PATH: &'static str = "/auth/register";
    const METHOD: HttpMethod = HttpMethod::Post;
    const REQUIRES_AUTH: bool = false;
}

// =========================================================
// Problems & Stats
// =========================================================

/// List the user's problems, in backend order
#[derive(Debug, Serialize, Deserialize)]
pub struct ListProblemsRequest;

impl ApiRequest for ListProblemsRequest {
    type Response = Vec<Problem>;
    const PATH: &'static str = "/problems";
    const METHOD: HttpMethod = HttpMethod::Get;
    const HAS_BODY: bool = false;
}

// Re-uses CreateProblemRequest as the body
impl ApiRequest for CreateProblemRequest {
    type Response = CreateProblemResponse;
    const PATH: &'static str = "/problems";
    const METHOD: HttpMethod = HttpMethod::Post;
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GetStatsRequest;

impl ApiRequest for GetStatsRequest {
    type Response = Stats;
    const PATH: &'static str = "/stats";
    const METHOD: HttpMethod = HttpMethod::Get;
    const HAS_BODY: bool = false;
}

/// Populate sample problems for the current user
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedDataRequest;

impl ApiRequest for SeedDataRequest {
    type Response = SeedResponse;
    const PATH: &'static str = "/seed-data";
    const METHOD: HttpMethod = HttpMethod::Post;
    const HAS_BODY: bool = false;
}
