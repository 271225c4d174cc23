//! Application services - Use case implementations
//!
//! Content loading, the mini-game sessions and progress sync. Services take
//! their outbound ports as trait objects and return domain types or views.

pub mod board_game_service;
pub mod content_service;
pub mod module_walkthrough_service;
pub mod progress_service;
pub mod quiz;
pub mod snap_quiz_service;
pub mod wheel_service;
pub mod writ_quest_service;

pub use board_game_service::{BoardGameSession, GateAnswer, GateQuestion};
pub use content_service::{
    AdvisoryNotice, ContentCatalog, ContentService, ContentSource, OfflineContent, OFFLINE_NOTICE,
};
pub use module_walkthrough_service::{LessonAnswer, LessonStep, ModuleWalkthrough};
pub use progress_service::{ProgressService, RecordOutcome, SyncStatus};
pub use quiz::{session_rng, AnswerFeedback, QuestionError, QuestionView};
pub use snap_quiz_service::{
    SnapCard, SnapError, SnapFeedback, SnapQuizSession, SnapSummary, DEFAULT_DECK_SIZE,
};
pub use wheel_service::{category_index, WheelAnswer, WheelCategory, WheelSession, WheelSpin, WHEEL_CATEGORIES};
pub use writ_quest_service::{WritAnswer, WritQuest, WRIT_BADGE};
