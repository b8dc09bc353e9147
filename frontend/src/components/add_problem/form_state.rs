//! 表单状态管理模块
//!
//! 将零散的 signal 整合为 `FormState` 结构体，负责：
//! - 数据的持有
//! - 数据的重置
//! - 数据到请求对象的转换（含校验）

use crate::error::{AppError, AppResult};
use codetrackr_shared::{CompletedDate, CreateProblemRequest, Difficulty, Platform, Topic};
use leptos::prelude::*;

// =========================================================
// TopicSelection - 知识点多选集合
// =========================================================

/// 已选知识点集合
///
/// 元素唯一；保留选择顺序仅用于展示，不影响相等性以外的语义。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicSelection {
    topics: Vec<Topic>,
}

impl TopicSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, topic: Topic) -> bool {
        self.topics.contains(&topic)
    }

    /// 加入集合，已存在时返回 false
    pub fn insert(&mut self, topic: Topic) -> bool {
        if self.contains(topic) {
            return false;
        }
        self.topics.push(topic);
        true
    }

    /// 移出集合，不存在时返回 false
    pub fn remove(&mut self, topic: Topic) -> bool {
        let before = self.topics.len();
        self.topics.retain(|t| *t != topic);
        self.topics.len() != before
    }

    /// 已选则移除，未选则加入；返回操作后是否处于选中状态
    pub fn toggle(&mut self, topic: Topic) -> bool {
        if self.remove(topic) {
            false
        } else {
            self.topics.push(topic);
            true
        }
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// 按选择顺序迭代
    pub fn iter(&self) -> impl Iterator<Item = Topic> + '_ {
        self.topics.iter().copied()
    }

    /// 逗号分隔的展示文本，例如 `Arrays, DP`
    pub fn joined(&self) -> String {
        self.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
    }

    /// 请求中使用的字符串列表
    pub fn to_names(&self) -> Vec<String> {
        self.iter().map(|t| t.as_str().to_string()).collect()
    }
}

// =========================================================
// ProblemDraft - 表单的纯数据快照
// =========================================================

/// 表单当前的输入值
#[derive(Debug, Clone, PartialEq)]
pub struct ProblemDraft {
    pub title: String,
    pub platform: Platform,
    pub difficulty: Difficulty,
    /// `<input type="date">` 的原始值
    pub date: String,
    pub topics: TopicSelection,
}

impl ProblemDraft {
    pub fn new(today: CompletedDate) -> Self {
        Self {
            title: String::new(),
            platform: Platform::default(),
            difficulty: Difficulty::default(),
            date: today.to_string(),
            topics: TopicSelection::new(),
        }
    }

    /// 校验并转换为请求对象
    ///
    /// 任何校验失败都在发请求之前返回。
    pub fn validate(&self) -> AppResult<CreateProblemRequest> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Please enter a problem title"));
        }
        let date_completed = CompletedDate::parse(&self.date)
            .ok_or_else(|| AppError::validation("Please enter a valid completion date"))?;
        if self.topics.is_empty() {
            return Err(AppError::validation("Please select at least one topic"));
        }

        Ok(CreateProblemRequest {
            title: title.to_string(),
            platform: self.platform,
            difficulty: self.difficulty,
            topics: self.topics.to_names(),
            date_completed,
        })
    }
}

// =========================================================
// FormState - 响应式表单状态
// =========================================================

/// 表单状态结构体
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，非常适合作为 Props 在组件间传递。
#[derive(Clone, Copy)]
pub struct FormState {
    pub title: RwSignal<String>,
    pub platform: RwSignal<Platform>,
    pub difficulty: RwSignal<Difficulty>,
    pub date: RwSignal<String>,
    pub topics: RwSignal<TopicSelection>,
}

impl FormState {
    /// 创建新的表单状态，日期默认为今天
    pub fn new() -> Self {
        let draft = ProblemDraft::new(CompletedDate::today());
        Self {
            title: RwSignal::new(draft.title),
            platform: RwSignal::new(draft.platform),
            difficulty: RwSignal::new(draft.difficulty),
            date: RwSignal::new(draft.date),
            topics: RwSignal::new(draft.topics),
        }
    }

    /// 重置表单到初始状态
    pub fn reset(&self) {
        let draft = ProblemDraft::new(CompletedDate::today());
        self.title.set(draft.title);
        self.platform.set(draft.platform);
        self.difficulty.set(draft.difficulty);
        self.date.set(draft.date);
        self.topics.set(draft.topics);
    }

    pub fn toggle_topic(&self, topic: Topic) {
        self.topics.update(|s| {
            s.toggle(topic);
        });
    }

    /// 当前输入值的快照（不追踪依赖）
    pub fn draft(&self) -> ProblemDraft {
        ProblemDraft {
            title: self.title.get_untracked(),
            platform: self.platform.get_untracked(),
            difficulty: self.difficulty.get_untracked(),
            date: self.date.get_untracked(),
            topics: self.topics.get_untracked(),
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> CompletedDate {
        CompletedDate::parse("2024-06-01").unwrap()
    }

    fn filled_draft() -> ProblemDraft {
        let mut draft = ProblemDraft::new(today());
        draft.title = "  Two Sum ".into();
        draft.topics.insert(Topic::Arrays);
        draft.topics.insert(Topic::HashTable);
        draft
    }

    #[test]
    fn toggle_twice_restores_previous_selection() {
        let mut selection = TopicSelection::new();
        selection.insert(Topic::Arrays);
        let before = selection.clone();

        assert!(selection.toggle(Topic::Dp));
        assert!(!selection.toggle(Topic::Dp));
        assert_eq!(selection, before);

        assert!(!selection.toggle(Topic::Arrays));
        assert!(selection.toggle(Topic::Arrays));
        assert_eq!(selection, before);
    }

    #[test]
    fn selection_keeps_choice_order_without_duplicates() {
        let mut selection = TopicSelection::new();
        selection.insert(Topic::Greedy);
        selection.insert(Topic::Arrays);
        assert!(!selection.insert(Topic::Greedy));

        assert_eq!(selection.len(), 2);
        assert_eq!(selection.joined(), "Greedy, Arrays");
        assert!(selection.remove(Topic::Greedy));
        assert!(!selection.remove(Topic::Greedy));
        assert_eq!(selection.joined(), "Arrays");
    }

    #[test]
    fn valid_draft_becomes_request() {
        let req = filled_draft().validate().unwrap();
        assert_eq!(req.title, "Two Sum");
        assert_eq!(req.platform, Platform::LeetCode);
        assert_eq!(req.difficulty, Difficulty::Easy);
        assert_eq!(req.topics, vec!["Arrays", "Hash Table"]);
        assert_eq!(req.date_completed, today());
    }

    #[test]
    fn zero_topics_is_a_validation_error() {
        let mut draft = filled_draft();
        draft.topics = TopicSelection::new();
        assert_eq!(
            draft.validate(),
            Err(AppError::Validation("Please select at least one topic".into()))
        );
    }

    #[test]
    fn blank_title_and_bad_date_are_rejected() {
        let mut draft = filled_draft();
        draft.title = "   ".into();
        assert!(matches!(draft.validate(), Err(AppError::Validation(_))));

        let mut draft = filled_draft();
        draft.date = "2024-13-01".into();
        assert!(matches!(draft.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn new_draft_defaults_to_today() {
        let draft = ProblemDraft::new(today());
        assert_eq!(draft.date, "2024-06-01");
        assert!(draft.topics.is_empty());
    }
}
