//! 地址输入状态与异步结果的时序规则
//!
//! 每个用户事件（输入文本、选择建议、移动坐标）都会取得一个新的序号；
//! 异步的搜索 / 反向地理编码结果只有在发起之后没有更新的事件时才会被应用。

use crate::geocode::{Suggestion, should_search};
use crate::model::Location;

/// 异步请求发起时的事件序号
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressSync {
    pub text: String,
    pub location: Option<Location>,
    pub suggestions: Vec<Suggestion>,
    pub show_suggestions: bool,
    seq: u64,
}

impl AddressSync {
    pub fn new(text: &str, location: Option<Location>) -> Self {
        Self {
            text: text.to_string(),
            location,
            ..Self::default()
        }
    }

    fn next_ticket(&mut self) -> Ticket {
        self.seq += 1;
        Ticket(self.seq)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.seq
    }

    /// 用户输入文本
    ///
    /// 需要搜索时返回 ticket；查询过短时清空建议列表并返回 `None`。
    pub fn type_text(&mut self, text: &str) -> Option<Ticket> {
        let ticket = self.next_ticket();
        self.text = text.to_string();

        if should_search(text) {
            Some(ticket)
        } else {
            self.suggestions.clear();
            self.show_suggestions = false;
            None
        }
    }

    /// 选择一条建议：同时设置地址文本与坐标，并隐藏列表
    pub fn pick_suggestion(&mut self, suggestion: &Suggestion) {
        self.next_ticket();
        self.text = suggestion.display_name.clone();
        self.location = Some(suggestion.location);
        self.suggestions.clear();
        self.show_suggestions = false;
    }

    /// 坐标变化（地图标记）；返回反向地理编码使用的 ticket
    pub fn move_marker(&mut self, location: Location) -> Ticket {
        self.location = Some(location);
        self.next_ticket()
    }

    /// 坐标输入无法解析：清除坐标，使表单校验失败而不是沿用旧值
    ///
    /// 同时作废进行中的反向地理编码。
    pub fn clear_location(&mut self) {
        self.next_ticket();
        self.location = None;
    }

    /// 失去焦点时收起建议列表，保留已取得的建议
    pub fn hide_suggestions(&mut self) {
        self.show_suggestions = false;
    }

    /// 应用搜索结果；过期结果被丢弃并返回 false
    pub fn apply_search(&mut self, ticket: Ticket, suggestions: Vec<Suggestion>) -> bool {
        if !self.is_current(ticket) {
            log::debug!("discarding stale address suggestions");
            return false;
        }
        self.show_suggestions = !suggestions.is_empty();
        self.suggestions = suggestions;
        true
    }

    /// 应用反向地理编码结果；过期或为空时不修改地址文本
    pub fn apply_reverse(&mut self, ticket: Ticket, display_name: Option<String>) -> bool {
        if !self.is_current(ticket) {
            log::debug!("discarding stale reverse geocode result");
            return false;
        }
        match display_name {
            Some(name) => {
                self.text = name;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(name: &str, lat: f64, lon: f64) -> Suggestion {
        Suggestion {
            display_name: name.to_string(),
            location: Location::new(lat, lon),
        }
    }

    #[test]
    fn short_input_clears_suggestions_without_a_search() {
        let mut sync = AddressSync::default();
        let ticket = sync.type_text("Mai").unwrap();
        assert!(sync.apply_search(ticket, vec![suggestion("Main St", 1.0, 2.0)]));
        assert!(sync.show_suggestions);

        assert_eq!(sync.type_text("Ma"), None);
        assert!(sync.suggestions.is_empty());
        assert!(!sync.show_suggestions);
        assert_eq!(sync.text, "Ma");
    }

    #[test]
    fn picking_a_suggestion_sets_text_and_location() {
        let mut sync = AddressSync::default();
        let ticket = sync.type_text("Main").unwrap();
        let pick = suggestion("1 Main St, Springfield", 39.8, -89.6);
        sync.apply_search(ticket, vec![pick.clone()]);

        sync.pick_suggestion(&pick);

        assert_eq!(sync.text, "1 Main St, Springfield");
        assert_eq!(sync.location, Some(Location::new(39.8, -89.6)));
        assert!(!sync.show_suggestions);
        assert!(sync.suggestions.is_empty());
    }

    #[test]
    fn reverse_geocode_fills_the_address() {
        let mut sync = AddressSync::new("", None);
        let ticket = sync.move_marker(Location::new(12.97, 77.59));

        assert!(sync.apply_reverse(ticket, Some("MG Road, Bengaluru".to_string())));
        assert_eq!(sync.text, "MG Road, Bengaluru");
        assert_eq!(sync.location, Some(Location::new(12.97, 77.59)));
    }

    #[test]
    fn reverse_result_after_a_manual_edit_is_discarded() {
        let mut sync = AddressSync::default();
        let ticket = sync.move_marker(Location::new(12.97, 77.59));
        sync.type_text("My own address");

        assert!(!sync.apply_reverse(ticket, Some("MG Road".to_string())));
        assert_eq!(sync.text, "My own address");
    }

    #[test]
    fn older_search_results_lose_to_newer_events() {
        let mut sync = AddressSync::default();
        let first = sync.type_text("Main").unwrap();
        let second = sync.type_text("Main Street").unwrap();

        assert!(!sync.apply_search(first, vec![suggestion("Maine", 45.0, -69.0)]));
        assert!(sync.suggestions.is_empty());

        let marker = sync.move_marker(Location::new(1.0, 1.0));
        assert!(!sync.apply_search(second, vec![suggestion("Main Street", 1.0, 2.0)]));
        assert!(sync.apply_reverse(marker, Some("Null Island".to_string())));
    }

    #[test]
    fn unparseable_coordinates_drop_the_previous_location() {
        let mut sync = AddressSync::new("1 Main St", Some(Location::new(1.0, 2.0)));
        let pending = sync.move_marker(Location::new(3.0, 4.0));

        sync.clear_location();

        assert_eq!(sync.location, None);
        assert_eq!(sync.text, "1 Main St");
        assert!(!sync.apply_reverse(pending, Some("Elsewhere".to_string())));
    }

    #[test]
    fn hiding_suggestions_keeps_the_list() {
        let mut sync = AddressSync::default();
        let ticket = sync.type_text("Main").unwrap();
        sync.apply_search(ticket, vec![suggestion("Main St", 1.0, 2.0)]);

        sync.hide_suggestions();

        assert!(!sync.show_suggestions);
        assert_eq!(sync.suggestions.len(), 1);
    }

    #[test]
    fn empty_reverse_result_keeps_the_text() {
        let mut sync = AddressSync::new("Somewhere", None);
        let ticket = sync.move_marker(Location::new(0.0, 0.0));

        assert!(!sync.apply_reverse(ticket, None));
        assert_eq!(sync.text, "Somewhere");
    }
}
