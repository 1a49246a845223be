//! Cata 语言的解析器实现。
//! 递归下降，语法里目前没有中缀运算符，表达式解析因此非常短。

use super::ast::*;
use crate::lexer::{Scanner, TokenKind};
use crate::reporter::CompilerError;

// --- 1. 主解析器结构体 ---

/// 解析器结构体，拥有词法扫描器。
pub struct Parser {
    s: Scanner,
}

/// 解析一个完整的 Cata 源文件。
pub fn parse(source: &str) -> Result<Module, CompilerError> {
    let mut parser = Parser {
        s: Scanner::new(source)?,
    };
    parser.parse_module()
}

// --- 2. Trait 定义：用于组织解析逻辑 ---

/// `DeclarationParser` Trait 负责解析顶层声明。
trait DeclarationParser {
    /// 解析一个函数声明（包括 `extern` 变体）。
    fn parse_fn_decl(&mut self) -> Result<FnDecl, CompilerError>;
    /// 解析一个结构体声明。
    fn parse_struct_decl(&mut self) -> Result<StructDecl, CompilerError>;
    /// 解析一个由逗号分隔的形参表，直到遇到 `end`。
    fn parse_params(&mut self, end: TokenKind) -> Result<Vec<Param>, CompilerError>;
}

/// `TypeParser` Trait 负责解析类型。
trait TypeParser {
    /// 解析一个命名类型，可以带方括号中的泛型实参。
    fn parse_type(&mut self, expected: &str) -> Result<NamedType, CompilerError>;
}

/// `StatementParser` Trait 负责解析各类语句。
trait StatementParser {
    /// 解析任意类型的语句。
    fn parse_stmt(&mut self, expected: &str) -> Result<Stmt, CompilerError>;
    /// 解析 `if` 语句，包括整条 else-if 链。
    fn parse_if_stmt(&mut self) -> Result<Stmt, CompilerError>;
    /// 解析 `while` 语句。
    fn parse_while_stmt(&mut self) -> Result<Stmt, CompilerError>;
    /// 解析一个 `{...}` 语句块。
    fn parse_block(&mut self, expected: &str) -> Result<Vec<Stmt>, CompilerError>;
}

/// `ExpressionParser` Trait 负责解析表达式。
trait ExpressionParser {
    /// 解析表达式的主入口。
    fn parse_expr(&mut self, expected: &str) -> Result<Expr, CompilerError>;
    /// 解析一个 primary 表达式：操作数后面跟任意多的调用和字段访问。
    fn parse_primary(&mut self, expected: &str) -> Result<Expr, CompilerError>;
    /// 解析一个操作数：字面量或标识符。
    fn parse_operand(&mut self, expected: &str) -> Result<Expr, CompilerError>;
}

// --- 3. 实现 ---

impl Parser {
    fn parse_module(&mut self) -> Result<Module, CompilerError> {
        let mut module = Module {
            fns: Vec::new(),
            structs: Vec::new(),
        };
        while !self.s.has(TokenKind::Eof) {
            if self.s.has(TokenKind::Fn) || self.s.has(TokenKind::Extern) {
                module.fns.push(self.parse_fn_decl()?);
            } else {
                module.structs.push(self.parse_struct_decl()?);
            }
        }
        Ok(module)
    }

    /// 解析一个标识符。
    fn parse_ident(&mut self, expected: &str) -> Result<Ident, CompilerError> {
        let pos = self.s.pos();
        let name = self.s.expect(TokenKind::Ident, expected)?;
        Ok(Ident { pos, name })
    }
}

impl DeclarationParser for Parser {
    fn parse_fn_decl(&mut self) -> Result<FnDecl, CompilerError> {
        // 1. `extern` 前缀决定了声明的两种形态
        let is_extern = self.s.skip(TokenKind::Extern)?;
        self.s.expect(TokenKind::Fn, "declaration")?;
        let name = self.parse_ident("identifier")?;

        // 2. 形参表
        self.s.expect(TokenKind::LParen, "'('")?;
        let params = self.parse_params(TokenKind::RParen)?;

        if is_extern {
            // 3a. extern 声明：可选的返回类型后必须紧跟分号，不允许函数体
            let mut ret = None;
            if !self.s.skip(TokenKind::Semicolon)? {
                ret = Some(self.parse_type("type or ';'")?);
                self.s.expect(TokenKind::Semicolon, "';'")?;
            }
            Ok(FnDecl {
                name,
                params,
                ret,
                body: None,
            })
        } else {
            // 3b. 普通函数：返回类型可省略，函数体必须存在
            let mut ret = None;
            if !self.s.has(TokenKind::LBrace) {
                ret = Some(self.parse_type("type or '{'")?);
            }
            let body = self.parse_block("type or '{'")?;
            Ok(FnDecl {
                name,
                params,
                ret,
                body: Some(body),
            })
        }
    }

    fn parse_struct_decl(&mut self) -> Result<StructDecl, CompilerError> {
        self.s.expect(TokenKind::Struct, "declaration")?;
        let name = self.parse_ident("identifier")?;
        let mut params = Vec::new();
        if self.s.skip(TokenKind::LBracket)? {
            // 泛型形参
            loop {
                params.push(self.parse_ident("identifier")?);
                if !self.s.skip(TokenKind::Comma)? {
                    break;
                }
            }
            self.s.expect(TokenKind::RBracket, "']'")?;
        }
        self.s.expect(TokenKind::LBrace, "'{'")?;
        let fields = self.parse_params(TokenKind::RBrace)?;
        Ok(StructDecl {
            name,
            params,
            fields,
        })
    }

    fn parse_params(&mut self, end: TokenKind) -> Result<Vec<Param>, CompilerError> {
        let mut params = Vec::new();
        if !self.s.has(end) {
            loop {
                let name = self.parse_ident("identifier")?;
                self.s.expect(TokenKind::Colon, "':'")?;
                let ty = self.parse_type("type")?;
                params.push(Param { name, ty });
                if !self.s.skip(TokenKind::Comma)? {
                    break;
                }
            }
        }
        self.s.expect(end, "')', '}', or ','")?;
        Ok(params)
    }
}

impl TypeParser for Parser {
    fn parse_type(&mut self, expected: &str) -> Result<NamedType, CompilerError> {
        let name = self.parse_ident(expected)?;
        let mut args = Vec::new();
        if self.s.skip(TokenKind::LBracket)? {
            // 泛型实参
            loop {
                args.push(self.parse_type("type")?);
                if !self.s.skip(TokenKind::Comma)? {
                    break;
                }
            }
            self.s.expect(TokenKind::RBracket, "',' or ']'")?;
        }
        Ok(NamedType { name, args })
    }
}

impl StatementParser for Parser {
    fn parse_stmt(&mut self, expected: &str) -> Result<Stmt, CompilerError> {
        let pos = self.s.pos();
        if self.s.skip(TokenKind::Return)? {
            // return 语句，返回值可选
            if !self.s.skip(TokenKind::Semicolon)? {
                let expr = self.parse_expr("expression or ';'")?;
                self.s.expect(TokenKind::Semicolon, "';'")?;
                Ok(Stmt::Return {
                    pos,
                    expr: Some(expr),
                })
            } else {
                Ok(Stmt::Return { pos, expr: None })
            }
        } else if self.s.skip(TokenKind::Var)? {
            // 变量声明语句
            let name = self.parse_ident("identifier")?;
            self.s.expect(TokenKind::Colon, "':'")?;
            let ty = self.parse_type("type")?;
            let mut init = None;
            if self.s.skip(TokenKind::Assign)? {
                init = Some(self.parse_expr("expression")?);
                self.s.expect(TokenKind::Semicolon, "';'")?;
            } else {
                self.s.expect(TokenKind::Semicolon, "'=' or ';'")?;
            }
            Ok(Stmt::Var {
                pos,
                name,
                ty,
                init,
            })
        } else if self.s.has(TokenKind::If) {
            self.parse_if_stmt()
        } else if self.s.has(TokenKind::While) {
            self.parse_while_stmt()
        } else {
            // 剩下的情况以一个表达式开头：赋值语句或表达式语句
            let expr = self.parse_expr(expected)?;
            if self.s.skip(TokenKind::Assign)? {
                let right = self.parse_expr("expression")?;
                self.s.expect(TokenKind::Semicolon, "';'")?;
                Ok(Stmt::Assign { left: expr, right })
            } else {
                self.s.expect(TokenKind::Semicolon, "';' or '='")?;
                Ok(Stmt::Expr(expr))
            }
        }
    }

    fn parse_if_stmt(&mut self) -> Result<Stmt, CompilerError> {
        let pos = self.s.pos();
        self.s.expect(TokenKind::If, "'if'")?;
        self.s.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr("expression")?;
        self.s.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block("'{'")?;
        let els = if self.s.skip(TokenKind::Else)? {
            if self.s.has(TokenKind::If) {
                // else-if 链：else 分支就是下一个 if 语句
                Some(Box::new(self.parse_if_stmt()?))
            } else {
                let else_pos = self.s.pos();
                let stmts = self.parse_block("'if' or '{'")?;
                Some(Box::new(Stmt::Block {
                    pos: else_pos,
                    stmts,
                }))
            }
        } else {
            None
        };
        Ok(Stmt::If {
            pos,
            cond,
            body,
            els,
        })
    }

    fn parse_while_stmt(&mut self) -> Result<Stmt, CompilerError> {
        let pos = self.s.pos();
        self.s.expect(TokenKind::While, "'while'")?;
        self.s.expect(TokenKind::LParen, "'('")?;
        let cond = self.parse_expr("expression")?;
        self.s.expect(TokenKind::RParen, "')'")?;
        let body = self.parse_block("'{'")?;
        Ok(Stmt::While { pos, cond, body })
    }

    fn parse_block(&mut self, expected: &str) -> Result<Vec<Stmt>, CompilerError> {
        self.s.expect(TokenKind::LBrace, expected)?;
        let mut block = Vec::new();
        while !self.s.skip(TokenKind::RBrace)? {
            block.push(self.parse_stmt("statement or '}'")?);
        }
        Ok(block)
    }
}

impl ExpressionParser for Parser {
    fn parse_expr(&mut self, expected: &str) -> Result<Expr, CompilerError> {
        self.parse_primary(expected)
    }

    fn parse_primary(&mut self, expected: &str) -> Result<Expr, CompilerError> {
        let mut expr = self.parse_operand(expected)?;
        while self.s.has(TokenKind::LParen) || self.s.has(TokenKind::Dot) {
            if self.s.skip(TokenKind::LParen)? {
                // 函数调用
                let mut args = Vec::new();
                if !self.s.skip(TokenKind::RParen)? {
                    loop {
                        args.push(self.parse_expr("expression")?);
                        if !self.s.skip(TokenKind::Comma)? {
                            break;
                        }
                    }
                    self.s.expect(TokenKind::RParen, "',' or ')'")?;
                }
                expr = Expr::Call {
                    callee: Box::new(expr),
                    args,
                };
            } else if self.s.skip(TokenKind::Dot)? {
                // 字段访问
                let field = self.parse_ident("identifier")?;
                expr = Expr::Field {
                    base: Box::new(expr),
                    field,
                };
            }
        }
        Ok(expr)
    }

    fn parse_operand(&mut self, expected: &str) -> Result<Expr, CompilerError> {
        let pos = self.s.pos();
        if self.s.has(TokenKind::Int) {
            let val = self.s.expect(TokenKind::Int, "")?;
            Ok(Expr::Int { pos, val })
        } else if self.s.has(TokenKind::Str) {
            let val = self.s.expect(TokenKind::Str, "")?;
            Ok(Expr::Str { pos, val })
        } else {
            let name = self.parse_ident(expected)?;
            Ok(Expr::Var { name })
        }
    }
}
