use serde::Deserialize;
use validator::Validate;

use crate::utils::validation::non_blank;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct CreateCommentPayload {
    #[validate(custom(function = "non_blank"), length(max = 5000))]
    pub comment_text: String,
}
