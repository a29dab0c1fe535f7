mod assessment_vm;
mod statistics_vm;

pub use assessment_vm::{
    AssessmentRowVm, RowAction, confirm_prompt, map_assessment_detail, map_assessment_rows,
};
pub use statistics_vm::{LevelBarVm, map_level_bars};
