//! 面板数据编排与派生视图
//!
//! 与 DOM 无关：
//! - `load_dashboard`: 并发拉取题目与统计，二者都成功才提交
//! - `LoadTracker`: 丢弃过期的加载结果
//! - 图表 / 列表 / 表格的截取规则

use crate::api::CodeTrackrApi;
use crate::error::AppResult;
use crate::web::HttpTransport;
use codetrackr_shared::{Problem, Stats, TopicStat};

/// 图表与知识点列表最多展示的条目数
pub const MAX_CHART_TOPICS: usize = 6;
/// 最近题目表格最多展示的行数
pub const MAX_RECENT_PROBLEMS: usize = 10;
/// 每道题最多展示的知识点徽章数
pub const MAX_TOPIC_BADGES: usize = 2;

/// 一次成功加载的完整快照
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DashboardData {
    pub problems: Vec<Problem>,
    pub stats: Stats,
}

impl DashboardData {
    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    /// 图表与知识点完成度使用的条目 (保持后端顺序)
    pub fn chart_topics(&self) -> &[TopicStat] {
        let end = self.stats.topic_wise.len().min(MAX_CHART_TOPICS);
        &self.stats.topic_wise[..end]
    }

    /// 最近题目 (保持后端顺序)
    pub fn recent_problems(&self) -> &[Problem] {
        let end = self.problems.len().min(MAX_RECENT_PROBLEMS);
        &self.problems[..end]
    }

    /// 覆盖的知识点数量
    pub fn topics_covered(&self) -> usize {
        self.stats.topic_wise.len()
    }

    /// 图表中最长的柱子对应的数量，至少为 1
    pub fn chart_max_count(&self) -> u32 {
        self.chart_topics()
            .iter()
            .map(|t| t.count)
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

/// 面板应展示的视图
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardView {
    /// 首次加载进行中
    Loading,
    /// 从未成功加载且当前没有进行中的请求：提供重试
    Failed,
    /// 没有任何题目：展示引导而不是图表与表格
    Empty,
    /// 图表、知识点列表与最近题目
    Populated,
}

impl DashboardView {
    /// 已有数据时刷新失败仍展示旧数据
    pub fn of(data: Option<&DashboardData>, loading: bool) -> Self {
        match data {
            None if loading => DashboardView::Loading,
            None => DashboardView::Failed,
            Some(d) if d.is_empty() => DashboardView::Empty,
            Some(_) => DashboardView::Populated,
        }
    }
}

/// 一道题在表格中展示的知识点
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicBadges {
    pub shown: Vec<String>,
    /// 剩余未展示的数量，0 表示不显示 `+N`
    pub hidden: usize,
}

impl TopicBadges {
    pub fn of(topics: &[String]) -> Self {
        let shown: Vec<String> = topics.iter().take(MAX_TOPIC_BADGES).cloned().collect();
        let hidden = topics.len().saturating_sub(MAX_TOPIC_BADGES);
        Self { shown, hidden }
    }

    /// `+N` 文案
    pub fn overflow_label(&self) -> Option<String> {
        (self.hidden > 0).then(|| format!("+{}", self.hidden))
    }

    /// 按展示顺序的全部标签
    pub fn labels(&self) -> Vec<String> {
        let mut labels = self.shown.clone();
        labels.extend(self.overflow_label());
        labels
    }
}

/// 并发拉取题目列表与统计
///
/// 任一请求失败则整体失败，调用方不会看到部分结果。
pub async fn load_dashboard<T: HttpTransport>(api: &CodeTrackrApi<T>) -> AppResult<DashboardData> {
    let (problems, stats) = futures::join!(api.get_problems(), api.get_stats());
    let data = DashboardData {
        problems: problems?,
        stats: stats?,
    };
    log::debug!(
        "dashboard loaded: {} problems, {} topics",
        data.problems.len(),
        data.stats.topic_wise.len()
    );
    Ok(data)
}

/// 加载代次
///
/// 每次发起加载取一张票，只有最新的票对应的结果才会被提交。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadTracker {
    current: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

impl LoadTracker {
    pub fn begin(&mut self) -> LoadTicket {
        self.current += 1;
        LoadTicket(self.current)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.current == ticket.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::web::MockTransport;
    use codetrackr_shared::protocol::HttpMethod;
    use codetrackr_shared::{CompletedDate, CreateProblemRequest, Difficulty, Platform};
    use serde_json::json;

    const BASE: &str = "http://backend.test/api";

    fn api() -> CodeTrackrApi<MockTransport> {
        CodeTrackrApi::with_transport(BASE, Some("t1".into()), MockTransport::new())
    }

    fn problem(id: usize, topics: &[&str]) -> Problem {
        Problem {
            id: format!("p{}", id),
            base: CreateProblemRequest {
                title: format!("Problem {}", id),
                platform: Platform::LeetCode,
                difficulty: Difficulty::Easy,
                topics: topics.iter().map(|t| t.to_string()).collect(),
                date_completed: CompletedDate::parse("2024-01-01").unwrap(),
            },
            user_id: None,
            created_at: None,
        }
    }

    fn topic_stat(topic: &str, count: u32) -> TopicStat {
        TopicStat {
            topic: topic.to_string(),
            count,
            percentage: 0.0,
        }
    }

    fn problems_json() -> serde_json::Value {
        json!([{
            "id": "p1",
            "title": "Two Sum",
            "platform": "LeetCode",
            "difficulty": "Easy",
            "topics": ["Arrays"],
            "date_completed": "2024-01-05"
        }])
    }

    fn stats_json() -> serde_json::Value {
        json!({
            "total_solved": 1,
            "current_streak": 1,
            "topic_wise": [{ "topic": "Arrays", "count": 1, "percentage": 100.0 }]
        })
    }

    #[tokio::test]
    async fn load_commits_both_results() {
        let api = api();
        let t = api.transport();
        t.mock_response(HttpMethod::Get, &format!("{}/problems", BASE), 200, problems_json());
        t.mock_response(HttpMethod::Get, &format!("{}/stats", BASE), 200, stats_json());

        let data = load_dashboard(&api).await.unwrap();
        assert_eq!(data.problems.len(), 1);
        assert_eq!(data.stats.total_solved, 1);
        assert_eq!(t.request_count(), 2);
    }

    #[tokio::test]
    async fn partial_success_is_total_failure() {
        let api = api();
        let t = api.transport();
        t.mock_response(HttpMethod::Get, &format!("{}/problems", BASE), 200, problems_json());
        t.mock_response(
            HttpMethod::Get,
            &format!("{}/stats", BASE),
            500,
            json!({ "detail": "boom" }),
        );

        let result = load_dashboard(&api).await;
        assert!(matches!(result, Err(AppError::Backend { status: 500, .. })));
        // 两个请求都已发出
        assert_eq!(t.request_count(), 2);
    }

    #[tokio::test]
    async fn stats_success_with_problem_failure_is_total_failure() {
        let api = api();
        let t = api.transport();
        t.mock_network_error(HttpMethod::Get, &format!("{}/problems", BASE));
        t.mock_response(HttpMethod::Get, &format!("{}/stats", BASE), 200, stats_json());

        assert!(load_dashboard(&api).await.is_err());
    }

    #[test]
    fn chart_keeps_first_six_topics_in_server_order() {
        let names = ["DP", "Arrays", "Strings", "Trees", "Graphs", "Greedy", "Stack", "Heap"];
        let data = DashboardData {
            problems: vec![problem(1, &["DP"])],
            stats: Stats {
                total_solved: 1,
                current_streak: 0,
                topic_wise: names
                    .iter()
                    .enumerate()
                    .map(|(i, n)| topic_stat(n, (i as u32) + 1))
                    .collect(),
            },
        };

        let shown: Vec<&str> = data.chart_topics().iter().map(|t| t.topic.as_str()).collect();
        assert_eq!(shown, vec!["DP", "Arrays", "Strings", "Trees", "Graphs", "Greedy"]);
        assert_eq!(data.chart_max_count(), 6);
        assert_eq!(data.topics_covered(), 8);
    }

    #[test]
    fn short_topic_lists_are_kept_whole() {
        let data = DashboardData {
            problems: vec![],
            stats: Stats {
                topic_wise: vec![topic_stat("DP", 0)],
                ..Stats::default()
            },
        };
        assert_eq!(data.chart_topics().len(), 1);
        assert_eq!(data.chart_max_count(), 1);
    }

    #[test]
    fn recent_problems_keep_first_ten() {
        let data = DashboardData {
            problems: (0..15).map(|i| problem(i, &["Arrays"])).collect(),
            stats: Stats::default(),
        };
        let ids: Vec<&str> = data.recent_problems().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 10);
        assert_eq!(ids.first(), Some(&"p0"));
        assert_eq!(ids.last(), Some(&"p9"));
    }

    #[test]
    fn topic_badges_collapse_after_two() {
        let topics: Vec<String> = ["Arrays", "DP", "Greedy"].iter().map(|s| s.to_string()).collect();
        let badges = TopicBadges::of(&topics);
        assert_eq!(badges.labels(), vec!["Arrays", "DP", "+1"]);

        let two: Vec<String> = vec!["Arrays".into(), "DP".into()];
        assert_eq!(TopicBadges::of(&two).overflow_label(), None);
        assert_eq!(TopicBadges::of(&two).labels(), vec!["Arrays", "DP"]);
    }

    #[test]
    fn empty_problem_list_selects_empty_view() {
        let empty = DashboardData::default();
        assert_eq!(DashboardView::of(Some(&empty), false), DashboardView::Empty);
        assert_eq!(DashboardView::of(None, true), DashboardView::Loading);

        let populated = DashboardData {
            problems: vec![problem(1, &["Arrays"])],
            stats: Stats::default(),
        };
        assert_eq!(DashboardView::of(Some(&populated), false), DashboardView::Populated);
        assert_eq!(DashboardView::of(Some(&populated), true), DashboardView::Populated);
    }

    #[tokio::test]
    async fn failed_first_load_offers_retry_instead_of_spinner() {
        let api = api();
        let t = api.transport();
        t.mock_network_error(HttpMethod::Get, &format!("{}/problems", BASE));
        t.mock_response(HttpMethod::Get, &format!("{}/stats", BASE), 200, stats_json());

        let first = load_dashboard(&api).await.ok();
        assert_eq!(DashboardView::of(first.as_ref(), false), DashboardView::Failed);
        // 重试发出后回到加载中
        assert_eq!(DashboardView::of(first.as_ref(), true), DashboardView::Loading);

        t.mock_response(HttpMethod::Get, &format!("{}/problems", BASE), 200, problems_json());
        let retried = load_dashboard(&api).await.ok();
        assert_eq!(DashboardView::of(retried.as_ref(), false), DashboardView::Populated);
        assert_eq!(t.request_count(), 4);
    }

    #[test]
    fn superseded_loads_are_discarded() {
        let mut tracker = LoadTracker::default();
        let first = tracker.begin();
        let second = tracker.begin();
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }
}
