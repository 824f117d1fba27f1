//! Texts the game posts to the room.

use super::format_duration;

pub const GAME_RULES: &str = "这是一把充满荣耀与死亡的左轮手枪，六个弹槽只有一颗子弹，中弹的那个人将会被禁言。勇敢的战士们啊，扣动你们的扳机吧！";

pub const DUPLICATE_JOIN: &str =
    "命运的选择只有一次，勇敢的战士，你已经站在了这场游戏的舞台上。";

pub const WRONG_VENUE: &str =
    "英雄的对决需要一个舞台，这场游戏只能在群聊的竞技场中上演。";

pub const CONTEXT_UNAVAILABLE: &str = "获取聊天信息失败";

pub const MUTE_FAILED: &str = "执行禁言操作失败";

/// Join confirmation with the running count.
pub fn joined(user_name: &str, position: usize, max: usize) -> String {
    format!(
        "米诺斯英雄们的故事......有喜剧，便也会有悲剧。舍弃了荣耀，@{} ( {} / {} )",
        user_name, position, max
    )
}

/// Announced right before the mute is executed.
pub fn victim(user_name: &str) -> String {
    format!(
        "枪声响起，这个悲剧的主角早已注定......@{} 成为了这段故事中的牺牲者。",
        user_name
    )
}

/// Closing announcement after the mute attempt.
pub fn consequence(user_name: &str, duration_secs: u32) -> String {
    format!(
        "命运无常，@{} 将在{}的沉默中回味这一刻。",
        user_name,
        format_duration(u64::from(duration_secs))
    )
}

pub fn command_error(description: &str) -> String {
    format!("发生错误：{}", description)
}

pub fn draw_error(description: &str) -> String {
    format!("执行禁言时发生错误：{}", description)
}
