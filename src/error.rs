//! 比对引擎的错误类型。
//!
//! 任意两条有限序列之间总存在最优比对，因此这里没有“比对失败”：
//! 只有参数错误、索引不匹配，以及内部不变量被破坏。

use thiserror::Error;

use crate::config::ConfigError;
use crate::util::Pos;

#[derive(Debug, Error)]
pub enum AlignError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// 预构建索引与 B 不对应
    #[error("text index covers {found} bases but sequence B has {expected}")]
    IndexMismatch { expected: usize, found: usize },

    /// 长度相同但内容不同，或索引表损坏
    #[error("text index was not built from sequence B: {0}")]
    IndexTextMismatch(String),

    /// 坐标用 u32 表示
    #[error("sequence of {len} bases exceeds the supported maximum of {max}")]
    SequenceTooLong { len: usize, max: usize },

    /// 编辑图总能通过纯插入/删除路径到达终点，队列耗尽说明启发式或边模型有缺陷
    #[error("frontier exhausted after {expanded} expansions without reaching {target}")]
    FrontierExhausted { expanded: usize, target: Pos },
}

pub type Result<T> = std::result::Result<T, AlignError>;
