// 语句降低。

use super::Generator;
use crate::parser::ast::Stmt;

impl Generator<'_> {
    /// 生成一个语句块。结尾的 `}` 后面不换行，由调用者决定。
    pub(super) fn gen_block(&mut self, block: &[Stmt]) {
        self.body.push_str("{\n");
        self.indent += 1;
        for stmt in block {
            self.gen_stmt(stmt, true);
        }
        self.indent -= 1;
        self.write_indent();
        self.body.push('}');
    }

    /// 生成一条语句。
    /// `indent` 为 false 表示这条语句内联在 `else` 后面，
    /// 不写前导缩进，收尾的换行也交给最外层的 if。
    pub(super) fn gen_stmt(&mut self, stmt: &Stmt, indent: bool) {
        if indent {
            self.write_indent();
        }
        match stmt {
            Stmt::Expr(expr) => {
                let expr = self.gen_expr(expr);
                self.body.push_str(&format!("{};\n", expr));
            }
            Stmt::Block { stmts, .. } => {
                self.gen_block(stmts);
            }
            Stmt::Return { expr, .. } => match expr {
                Some(expr) => {
                    let expr = self.gen_expr(expr);
                    self.body.push_str(&format!("return {};\n", expr));
                }
                None => self.body.push_str("return;\n"),
            },
            Stmt::Var { name, ty, init, .. } => {
                let cty = self.gen_type(ty);
                match init {
                    Some(init) => {
                        let init = self.gen_expr(init);
                        self.body
                            .push_str(&format!("{} {} = {};\n", cty, name.name, init));
                    }
                    None => {
                        self.body.push_str(&format!("{} {};\n", cty, name.name));
                    }
                }
            }
            Stmt::Assign { left, right } => {
                let left = self.gen_expr(left);
                let right = self.gen_expr(right);
                self.body.push_str(&format!("{} = {};\n", left, right));
            }
            Stmt::If {
                cond, body, els, ..
            } => {
                let cond = self.gen_expr(cond);
                self.body.push_str(&format!("if ({}) ", cond));
                self.gen_block(body);
                if let Some(els) = els {
                    self.body.push_str(" else ");
                    self.gen_stmt(els, false);
                }
                if indent {
                    self.body.push('\n');
                }
            }
            Stmt::While { cond, body, .. } => {
                let cond = self.gen_expr(cond);
                self.body.push_str(&format!("while ({}) ", cond));
                self.gen_block(body);
                self.body.push('\n');
            }
        }
    }
}
