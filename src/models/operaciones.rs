//! 权限操作集合与文本编码
//!
//! 一个权限授予 {Create, Read, Update, Delete} 的某个子集，持久化为文本。
//! 历史数据中存在多种编码（"CRUD" 字母串、JSON 数组、Postgres 数组字面量、
//! 逗号分隔），解码必须全部容忍；无法解析的文本解码为空集而不是错误：
//! 没有可解析授权的权限只是没有任何能力。

use serde::{Deserialize, Serialize};

/// CRUD 操作
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl Operation {
    /// 规范单字母表示
    pub fn letter(self) -> char {
        match self {
            Operation::Create => 'C',
            Operation::Read => 'R',
            Operation::Update => 'U',
            Operation::Delete => 'D',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(Operation::Create),
            'R' => Some(Operation::Read),
            'U' => Some(Operation::Update),
            'D' => Some(Operation::Delete),
            _ => None,
        }
    }

    /// 规范顺序：C, R, U, D
    pub const ALL: [Operation; 4] =
        [Operation::Create, Operation::Read, Operation::Update, Operation::Delete];

    fn bit(self) -> u8 {
        match self {
            Operation::Create => 1 << 0,
            Operation::Read => 1 << 1,
            Operation::Update => 1 << 2,
            Operation::Delete => 1 << 3,
        }
    }
}

/// 操作集合（u8 位集，序列化边界才转换为文本）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationSet(u8);

impl OperationSet {
    pub const EMPTY: OperationSet = OperationSet(0);

    pub fn new(operations: &[Operation]) -> Self {
        let mut set = OperationSet::EMPTY;
        for op in operations {
            set.insert(*op);
        }
        set
    }

    pub fn insert(&mut self, op: Operation) {
        self.0 |= op.bit();
    }

    pub fn contains(&self, op: Operation) -> bool {
        self.0 & op.bit() != 0
    }

    pub fn union(&self, other: OperationSet) -> OperationSet {
        OperationSet(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Operation> + '_ {
        Operation::ALL.into_iter().filter(|op| self.contains(*op))
    }

    /// 编码为规范文本：集合中的字母按 C, R, U, D 顺序排列
    pub fn encode(&self) -> String {
        self.iter().map(Operation::letter).collect()
    }

    /// 解码任意历史格式；无法解析或为空 → 空集
    pub fn decode(text: &str) -> OperationSet {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return OperationSet::EMPTY;
        }

        // JSON 数组格式：["C", "R"] 或 ["Create", "Read"]
        if trimmed.starts_with('[') {
            if let Ok(tokens) = serde_json::from_str::<Vec<String>>(trimmed) {
                let mut set = OperationSet::EMPTY;
                for token in tokens {
                    set = set.union(Self::decode_token(&token));
                }
                return set;
            }
            // 损坏的 JSON：落回词法扫描
        }

        // 其余格式：剥掉数组花括号和引号后按分隔符切分
        // 覆盖 "{C,R,U}"、"C,R"、"C R U"、"CRUD"
        let mut set = OperationSet::EMPTY;
        for token in trimmed
            .split(|c: char| matches!(c, ',' | ';' | ' ' | '{' | '}' | '[' | ']' | '"' | '\''))
            .filter(|t| !t.is_empty())
        {
            set = set.union(Self::decode_token(token));
        }
        set
    }

    /// 单个标记：完整操作名（英/西）或纯 CRUD 字母串
    ///
    /// 字母串必须整体由 C/R/U/D 组成才被接受，否则整个标记忽略：
    /// 任意单词里恰好出现的 r、u 不能变成授权
    fn decode_token(token: &str) -> OperationSet {
        let mut set = OperationSet::EMPTY;
        match token.to_ascii_lowercase().as_str() {
            "create" | "crear" => set.insert(Operation::Create),
            "read" | "leer" => set.insert(Operation::Read),
            "update" | "actualizar" => set.insert(Operation::Update),
            "delete" | "eliminar" => set.insert(Operation::Delete),
            _ => {
                if token.chars().all(|c| Operation::from_letter(c).is_some()) {
                    for c in token.chars() {
                        if let Some(op) = Operation::from_letter(c) {
                            set.insert(op);
                        }
                    }
                }
            }
        }
        set
    }

    /// 文本编码是否授权某操作
    pub fn authorizes(text: &str, op: Operation) -> bool {
        Self::decode(text).contains(op)
    }
}

impl FromIterator<Operation> for OperationSet {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        let mut set = OperationSet::EMPTY;
        for op in iter {
            set.insert(op);
        }
        set
    }
}
