// Copyright (c) RankList Authors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankListError {
    #[error("an entry with the same score and key is already present")]
    DuplicateEntry,
}
