use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

pub mod date;
pub mod protocol;

pub use date::CompletedDate;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const API_PREFIX: &str = "/api";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 用户与认证 (User & Auth)
// =========================================================

/// 用户资料
///
/// 后端可能附带更多字段，反序列化时忽略未知字段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            username: username.into(),
            created_at: None,
        }
    }
}

/// 登录 / 注册请求体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// 登录 / 注册成功的响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

/// 后端错误响应体 `{ "detail": "..." }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

/// 示例数据写入结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedResponse {
    pub message: String,
}

// =========================================================
// 题目领域模型 (Problem Domain)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Platform {
    #[default]
    LeetCode,
    Codeforces,
    HackerRank,
    CodeChef,
    AtCoder,
    /// 后端按自由字符串保存平台，未知值统一归为 Other
    #[serde(other)]
    Other,
}

impl Platform {
    pub const ALL: [Platform; 6] = [
        Platform::LeetCode,
        Platform::Codeforces,
        Platform::HackerRank,
        Platform::CodeChef,
        Platform::AtCoder,
        Platform::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::LeetCode => "LeetCode",
            Platform::Codeforces => "Codeforces",
            Platform::HackerRank => "HackerRank",
            Platform::CodeChef => "CodeChef",
            Platform::AtCoder => "AtCoder",
            Platform::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// 固定的知识点词表 (20 项)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topic {
    Arrays,
    Strings,
    #[serde(rename = "Linked List")]
    LinkedList,
    Trees,
    Graphs,
    #[serde(rename = "DP")]
    Dp,
    Greedy,
    Backtracking,
    #[serde(rename = "Binary Search")]
    BinarySearch,
    #[serde(rename = "Two Pointers")]
    TwoPointers,
    #[serde(rename = "Sliding Window")]
    SlidingWindow,
    Stack,
    Queue,
    Heap,
    #[serde(rename = "Hash Table")]
    HashTable,
    Math,
    #[serde(rename = "Bit Manipulation")]
    BitManipulation,
    Sorting,
    #[serde(rename = "DFS")]
    Dfs,
    #[serde(rename = "BFS")]
    Bfs,
}

impl Topic {
    pub const ALL: [Topic; 20] = [
        Topic::Arrays,
        Topic::Strings,
        Topic::LinkedList,
        Topic::Trees,
        Topic::Graphs,
        Topic::Dp,
        Topic::Greedy,
        Topic::Backtracking,
        Topic::BinarySearch,
        Topic::TwoPointers,
        Topic::SlidingWindow,
        Topic::Stack,
        Topic::Queue,
        Topic::Heap,
        Topic::HashTable,
        Topic::Math,
        Topic::BitManipulation,
        Topic::Sorting,
        Topic::Dfs,
        Topic::Bfs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Arrays => "Arrays",
            Topic::Strings => "Strings",
            Topic::LinkedList => "Linked List",
            Topic::Trees => "Trees",
            Topic::Graphs => "Graphs",
            Topic::Dp => "DP",
            Topic::Greedy => "Greedy",
            Topic::Backtracking => "Backtracking",
            Topic::BinarySearch => "Binary Search",
            Topic::TwoPointers => "Two Pointers",
            Topic::SlidingWindow => "Sliding Window",
            Topic::Stack => "Stack",
            Topic::Queue => "Queue",
            Topic::Heap => "Heap",
            Topic::HashTable => "Hash Table",
            Topic::Math => "Math",
            Topic::BitManipulation => "Bit Manipulation",
            Topic::Sorting => "Sorting",
            Topic::Dfs => "DFS",
            Topic::Bfs => "BFS",
        }
    }
}

/// 枚举值无法从字符串解析
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value: {}", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

// 三个词表枚举共享同一套 Display / FromStr 逻辑
macro_rules! impl_vocabulary {
    ($($ty:ty),*) => {$(
        impl Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant(s.to_string()))
            }
        }
    )*};
}

impl_vocabulary!(Platform, Difficulty, Topic);

/// 新建题目请求 (不含 id)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProblemRequest {
    pub title: String,
    pub platform: Platform,
    pub difficulty: Difficulty,
    pub topics: Vec<String>,
    pub date_completed: CompletedDate,
}

/// 一条已记录的刷题记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    #[serde(flatten)]
    pub base: CreateProblemRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// `POST /problems` 的成功响应
///
/// 后端可能返回新建的记录，也可能只返回确认信息；任何 2xx 都表示已保存。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateProblemResponse {
    Created(Problem),
    Acknowledged(Acknowledgement),
    /// 空响应体或 `null`
    Empty,
}

impl CreateProblemResponse {
    pub fn problem(&self) -> Option<&Problem> {
        match self {
            CreateProblemResponse::Created(problem) => Some(problem),
            _ => None,
        }
    }
}

/// 不含题目记录的确认响应，未知字段忽略
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Acknowledgement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// =========================================================
// 统计 (Stats)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicStat {
    pub topic: String,
    pub count: u32,
    pub percentage: f64,
}

/// 服务端计算的聚合统计快照
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Stats {
    pub total_solved: u32,
    pub current_streak: u32,
    #[serde(default)]
    pub topic_wise: Vec<TopicStat>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn topic_vocabulary_uses_display_names_on_the_wire() {
        assert_eq!(Topic::ALL.len(), 20);
        assert_eq!(
            serde_json::to_value(Topic::LinkedList).unwrap(),
            json!("Linked List")
        );
        assert_eq!("Hash Table".parse::<Topic>(), Ok(Topic::HashTable));
        assert_eq!("DP".parse::<Topic>(), Ok(Topic::Dp));
        assert!("dp".parse::<Topic>().is_err());
    }

    #[test]
    fn problem_flattens_create_fields() {
        let value = json!({
            "id": "p-1",
            "user_id": "u-1",
            "title": "Two Sum",
            "platform": "LeetCode",
            "difficulty": "Easy",
            "topics": ["Arrays", "Hash Table"],
            "date_completed": "2024-01-05",
            "created_at": "2024-01-05T10:00:00+00:00"
        });
        let problem: Problem = serde_json::from_value(value).unwrap();
        assert_eq!(problem.base.title, "Two Sum");
        assert_eq!(problem.base.platform, Platform::LeetCode);
        assert_eq!(problem.base.topics, vec!["Arrays", "Hash Table"]);
        assert_eq!(problem.base.date_completed.to_string(), "2024-01-05");
    }

    #[test]
    fn unknown_platform_falls_back_to_other() {
        let value = json!({
            "id": "p-2",
            "title": "Kata",
            "platform": "Codewars",
            "difficulty": "Medium",
            "topics": ["Strings"],
            "date_completed": "2024-02-01"
        });
        let problem: Problem = serde_json::from_value(value).unwrap();
        assert_eq!(problem.base.platform, Platform::Other);
        assert_eq!(serde_json::to_value(Platform::AtCoder).unwrap(), json!("AtCoder"));
    }

    #[test]
    fn create_problem_response_accepts_record_or_acknowledgement() {
        let created: CreateProblemResponse = serde_json::from_value(json!({
            "id": "p-3",
            "title": "Two Sum",
            "platform": "LeetCode",
            "difficulty": "Easy",
            "topics": ["Arrays"],
            "date_completed": "2024-01-05"
        }))
        .unwrap();
        assert_eq!(created.problem().map(|p| p.id.as_str()), Some("p-3"));

        let ack: CreateProblemResponse =
            serde_json::from_value(json!({ "message": "Problem created" })).unwrap();
        assert_eq!(
            ack,
            CreateProblemResponse::Acknowledged(Acknowledgement {
                message: Some("Problem created".into())
            })
        );

        let empty: CreateProblemResponse = serde_json::from_str("null").unwrap();
        assert_eq!(empty, CreateProblemResponse::Empty);
    }

    #[test]
    fn auth_response_accepts_minimal_user() {
        let value = json!({ "access_token": "t1", "user": { "username": "alice" } });
        let resp: AuthResponse = serde_json::from_value(value).unwrap();
        assert_eq!(resp.access_token, "t1");
        assert_eq!(resp.user.username, "alice");
        assert!(resp.token_type.is_none());
    }
}
