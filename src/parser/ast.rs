use crate::utils::Pos;
use std::fmt;

// --- 1. 标识符与类型 ---

/// 标识符，例如变量名、函数名或类型名。
#[derive(Debug, Clone)]
pub struct Ident {
    pub pos: Pos,
    pub name: String,
}

/// 命名类型，例如 `i32` 或 `slice[u8]`。泛型实参本身也是命名类型。
///
/// 相等性是结构性的，由检查器的类型比较函数定义，与位置无关。
#[derive(Debug, Clone)]
pub struct NamedType {
    pub name: Ident,
    pub args: Vec<NamedType>,
}

impl NamedType {
    pub fn at(&self) -> Pos {
        self.name.pos
    }

    /// 无实参的内置类型。
    fn primitive(name: &str) -> NamedType {
        NamedType {
            name: Ident {
                pos: Pos::default(),
                name: name.to_string(),
            },
            args: Vec::new(),
        }
    }

    pub fn uint8() -> NamedType {
        NamedType::primitive("u8")
    }

    pub fn int32() -> NamedType {
        NamedType::primitive("i32")
    }

    pub fn boolean() -> NamedType {
        NamedType::primitive("bool")
    }

    pub fn slice(eltype: NamedType) -> NamedType {
        NamedType {
            name: Ident {
                pos: Pos::default(),
                name: "slice".to_string(),
            },
            args: vec![eltype],
        }
    }
}

impl fmt::Display for NamedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.args.is_empty() {
            return write!(f, "{}", self.name.name);
        }
        let args: Vec<String> = self.args.iter().map(|arg| arg.to_string()).collect();
        write!(f, "{}[{}]", self.name.name, args.join(", "))
    }
}

/// 函数类型。只存在于检查器的作用域中，不会出现在语法树里。
#[derive(Debug, Clone)]
pub struct FnType {
    pub params: Vec<NamedType>,
    pub ret: Option<NamedType>,
}

impl fmt::Display for FnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<String> = self.params.iter().map(|param| param.to_string()).collect();
        write!(f, "fn ({})", params.join(", "))?;
        if let Some(ret) = &self.ret {
            write!(f, " {}", ret)?;
        }
        Ok(())
    }
}

/// 检查器视角下的类型：命名类型或函数类型。
#[derive(Debug, Clone)]
pub enum Type {
    Named(NamedType),
    Fn(FnType),
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Named(ty) => write!(f, "{}", ty),
            Type::Fn(ty) => write!(f, "{}", ty),
        }
    }
}

// --- 2. 表达式 ---

/// 表达式。
#[derive(Debug, Clone)]
pub enum Expr {
    /// 整数字面量，词素按原样保留。
    Int { pos: Pos, val: String },
    /// 字符串字面量，存储引号之间的原始文本（转义序列未解码）。
    Str { pos: Pos, val: String },
    /// 变量引用。
    Var { name: Ident },
    /// 函数调用。
    Call { callee: Box<Expr>, args: Vec<Expr> },
    /// 字段访问。
    Field { base: Box<Expr>, field: Ident },
}

impl Expr {
    /// 诊断所指向的位置。
    pub fn at(&self) -> Pos {
        match self {
            Expr::Int { pos, .. } => *pos,
            Expr::Str { pos, .. } => *pos,
            Expr::Var { name } => name.pos,
            Expr::Call { callee, .. } => callee.at(),
            Expr::Field { base, .. } => base.at(),
        }
    }
}

// --- 3. 语句 ---

/// 语句。
///
/// `if` 的 else 分支总是存储为一条语句：要么是另一个 `if`（形成 else-if 链），
/// 要么是包装成 `Block` 的 else 体。检查器和生成器靠这个表示自然地递归。
#[derive(Debug, Clone)]
pub enum Stmt {
    /// 表达式语句。只有函数调用可以被用作语句。
    Expr(Expr),
    /// 由 `{ ... }` 包围的语句块。
    Block { pos: Pos, stmts: Vec<Stmt> },
    /// `return` 语句，返回值可选。
    Return { pos: Pos, expr: Option<Expr> },
    /// 变量声明语句，初始化表达式可选。
    Var {
        pos: Pos,
        name: Ident,
        ty: NamedType,
        init: Option<Expr>,
    },
    /// 赋值语句。
    Assign { left: Expr, right: Expr },
    /// `if` 语句。
    If {
        pos: Pos,
        cond: Expr,
        body: Vec<Stmt>,
        els: Option<Box<Stmt>>,
    },
    /// `while` 循环语句。
    While {
        pos: Pos,
        cond: Expr,
        body: Vec<Stmt>,
    },
}

// --- 4. 声明 ---

/// 函数或结构体字段的形参。
#[derive(Debug, Clone)]
pub struct Param {
    pub name: Ident,
    pub ty: NamedType,
}

/// 函数声明。`body` 为 `None` 当且仅当该声明带有 `extern`。
#[derive(Debug, Clone)]
pub struct FnDecl {
    pub name: Ident,
    pub params: Vec<Param>,
    pub ret: Option<NamedType>,
    pub body: Option<Vec<Stmt>>,
}

/// 结构体声明，可以带有泛型形参。字段按值包含。
#[derive(Debug, Clone)]
pub struct StructDecl {
    pub name: Ident,
    pub params: Vec<Ident>,
    pub fields: Vec<Param>,
}

/// 语法树的根节点，对应一个完整的 Cata 源文件。
#[derive(Debug, Clone)]
pub struct Module {
    pub fns: Vec<FnDecl>,
    pub structs: Vec<StructDecl>,
}
