// 作用域栈。
// 查找从最内层作用域向外走；重名检查也沿整条链进行，
// 因此这门语言里不存在任何形式的遮蔽。

use crate::parser::ast::{NamedType, Type};
use std::collections::HashMap;

/// 作用域中一个可引用的值：它的类型和可变性。
/// 函数名是函数类型的不可变值；`var` 绑定可变；形参不可变。
#[derive(Debug, Clone)]
pub struct ScopeVar {
    pub ty: Type,
    pub mutable: bool,
}

/// 一个类型声明的泛型信息：形参名列表。
/// 内置标量类型和非泛型结构体的形参表为空。
#[derive(Debug, Clone)]
pub struct GenericType {
    pub params: Vec<String>,
}

/// 单层作用域：变量表和类型表。
#[derive(Debug, Default)]
struct Frame {
    vars: HashMap<String, ScopeVar>,
    types: HashMap<String, GenericType>,
}

/// 作用域栈，最外层是全局作用域。
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl ScopeStack {
    /// 创建一个新的作用域栈，并自动进入全局作用域。
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![Frame::default()],
        }
    }

    /// 进入一个新的作用域。
    pub fn enter(&mut self) {
        self.frames.push(Frame::default());
    }

    /// 退出当前作用域。
    pub fn exit(&mut self) {
        self.frames.pop();
    }

    /// 在当前作用域中加入一个变量。
    /// 调用者必须先用 `find_var` 做过重名诊断；走到这里的重复是编译器缺陷。
    pub fn add_var(&mut self, name: &str, var: ScopeVar) {
        if self.find_var(name).is_some() {
            panic!("duplicate variable name");
        }
        let frame = self
            .frames
            .last_mut()
            .expect("scope stack should always have at least one frame");
        frame.vars.insert(name.to_string(), var);
    }

    /// 在当前作用域中加入一个类型。重复同样是编译器缺陷。
    pub fn add_type(&mut self, name: &str, ty: GenericType) {
        if self.find_type(name).is_some() {
            panic!("duplicate type name");
        }
        let frame = self
            .frames
            .last_mut()
            .expect("scope stack should always have at least one frame");
        frame.types.insert(name.to_string(), ty);
    }

    /// 从内向外查找一个变量。
    /// `true` 和 `false` 被虚拟地解析为不可变的 `bool` 值，永远无法被绑定覆盖。
    pub fn find_var(&self, name: &str) -> Option<ScopeVar> {
        if name == "true" || name == "false" {
            return Some(ScopeVar {
                ty: Type::Named(NamedType::boolean()),
                mutable: false,
            });
        }
        for frame in self.frames.iter().rev() {
            if let Some(var) = frame.vars.get(name) {
                return Some(var.clone());
            }
        }
        None
    }

    /// 从内向外查找一个类型。
    pub fn find_type(&self, name: &str) -> Option<GenericType> {
        for frame in self.frames.iter().rev() {
            if let Some(ty) = frame.types.get(name) {
                return Some(ty.clone());
            }
        }
        None
    }
}
