//! 这个模块是整个编译器错误处理系统的核心。
//! 它使用 `thiserror` 为每个编译阶段定义结构化的诊断信息。
//!
//! 所有诊断都是致命的：第一个错误会沿着 `Result` 一路传播到驱动程序，
//! 由驱动程序按 `路径:行:列: error: 消息` 的格式打印并以状态 1 退出。

use crate::utils::Pos;
use thiserror::Error;

/// 顶层的编译器错误枚举。
/// 词法、语法和语义阶段的错误都会被包含在这里。
#[derive(Debug, Error)]
pub enum CompilerError {
    /// 词法分析阶段的错误
    #[error(transparent)]
    Lexical(#[from] LexError),

    /// 语法分析阶段的错误
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// 语义检查阶段的错误
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

impl CompilerError {
    /// 诊断在源代码中指向的位置。
    pub fn pos(&self) -> Pos {
        match self {
            CompilerError::Lexical(error) => error.pos(),
            CompilerError::Syntax(error) => error.pos(),
            CompilerError::Semantic(error) => error.pos(),
        }
    }
}

/// 词法分析器可能产生的所有错误的集合。
#[derive(Debug, Error)]
pub enum LexError {
    #[error("'\\{found}' is not a valid escape sequence")]
    InvalidEscape { found: char, pos: Pos },

    #[error("unterminated string literal")]
    UnterminatedString { pos: Pos },

    #[error("invalid character '{found}'")]
    InvalidCharacter { found: char, pos: Pos },
}

impl LexError {
    pub fn pos(&self) -> Pos {
        match self {
            LexError::InvalidEscape { pos, .. } => *pos,
            LexError::UnterminatedString { pos } => *pos,
            LexError::InvalidCharacter { pos, .. } => *pos,
        }
    }
}

/// 语法分析器可能产生的所有错误的集合。
/// `found` 已经格式化完毕：标识符带引号显示其文本，其他词法单元用人类可读的名字。
#[derive(Debug, Error)]
pub enum SyntaxError {
    #[error("expected {expected} but got {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        pos: Pos,
    },
}

impl SyntaxError {
    pub fn pos(&self) -> Pos {
        match self {
            SyntaxError::UnexpectedToken { pos, .. } => *pos,
        }
    }
}

/// 语义检查器可能产生的所有错误的集合。
#[derive(Debug, Error)]
pub enum SemanticError {
    #[error("duplicate type '{name}'")]
    DuplicateType { name: String, pos: Pos },

    #[error("duplicate identifier '{name}'")]
    DuplicateIdent { name: String, pos: Pos },

    #[error("duplicate field name '{name}'")]
    DuplicateField { name: String, pos: Pos },

    #[error("recursive struct inclusion is not allowed")]
    RecursiveStruct { pos: Pos },

    #[error("struct must have at least one field")]
    EmptyStruct { pos: Pos },

    #[error("undefined type '{name}'")]
    UndefinedType { name: String, pos: Pos },

    #[error("expected {expected} generic arguments, but got {found}")]
    GenericArity {
        expected: usize,
        found: usize,
        pos: Pos,
    },

    #[error("undefined identifier '{name}'")]
    UndefinedIdent { name: String, pos: Pos },

    #[error("expected {expected} arguments, but got {found}")]
    ArgumentCount {
        expected: usize,
        found: usize,
        pos: Pos,
    },

    #[error("cannot call expression that does not have a value")]
    CallVoid { pos: Pos },

    #[error("cannot call value of type '{ty}'")]
    CallNonFn { ty: String, pos: Pos },

    #[error("value does not have field '{name}'")]
    MissingField { name: String, pos: Pos },

    #[error("expression does not have a value")]
    NoValue { pos: Pos },

    #[error("cannot convert from '{from}' to '{to}'")]
    TypeMismatch { from: String, to: String, pos: Pos },

    #[error("expected return value of type '{ty}'")]
    MissingReturnValue { ty: String, pos: Pos },

    #[error("function cannot return a value")]
    UnexpectedReturnValue { pos: Pos },

    #[error("expression cannot be used as statement")]
    InvalidExprStmt { pos: Pos },

    #[error("cannot assign to constant value")]
    AssignToConst { pos: Pos },

    #[error("not all paths return a value")]
    MissingReturn { pos: Pos },
}

impl SemanticError {
    pub fn pos(&self) -> Pos {
        match self {
            SemanticError::DuplicateType { pos, .. } => *pos,
            SemanticError::DuplicateIdent { pos, .. } => *pos,
            SemanticError::DuplicateField { pos, .. } => *pos,
            SemanticError::RecursiveStruct { pos } => *pos,
            SemanticError::EmptyStruct { pos } => *pos,
            SemanticError::UndefinedType { pos, .. } => *pos,
            SemanticError::GenericArity { pos, .. } => *pos,
            SemanticError::UndefinedIdent { pos, .. } => *pos,
            SemanticError::ArgumentCount { pos, .. } => *pos,
            SemanticError::CallVoid { pos } => *pos,
            SemanticError::CallNonFn { pos, .. } => *pos,
            SemanticError::MissingField { pos, .. } => *pos,
            SemanticError::NoValue { pos } => *pos,
            SemanticError::TypeMismatch { pos, .. } => *pos,
            SemanticError::MissingReturnValue { pos, .. } => *pos,
            SemanticError::UnexpectedReturnValue { pos } => *pos,
            SemanticError::InvalidExprStmt { pos } => *pos,
            SemanticError::AssignToConst { pos } => *pos,
            SemanticError::MissingReturn { pos } => *pos,
        }
    }
}

/// 把一个诊断按编译器的对外格式打印到标准输出。
pub fn report(path: &str, error: &CompilerError) {
    let pos = error.pos();
    println!("{}:{}:{}: error: {}", path, pos.line, pos.column, error);
}
