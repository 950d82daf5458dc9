use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Memo, NewMemo};
use crate::store::DataStore;

use super::helpers::{load_active, save_active};

pub fn run<S: DataStore>(store: &mut S, draft: NewMemo) -> Result<CmdResult> {
    draft.validate()?;

    let mut memos = load_active(store)?;
    let memo = Memo::new(draft);
    memos.push(memo.clone());
    save_active(store, &memos)?;
    tracing::debug!(id = %memo.id, "memo created");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Memo created ({}): {}",
        memo.id, memo.title
    )));
    result.affected_memos.push(memo);
    Ok(result)
}
