pub mod prompts;
pub mod render;

pub use prompts::{
    TodayInputs, collect_today_inputs, prompt_budget, prompt_store, prompt_weight, prompt_yes_no,
};
pub use render::{display_item_list, display_plan, display_targets, format_yen};
