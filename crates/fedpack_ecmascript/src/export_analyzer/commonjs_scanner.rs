use fedpack_common::ExportName;
use fedpack_utils::indexmap::FxIndexSet;
use oxc::{
  ast::ast::{Argument, AssignmentExpression, CallExpression, Expression, MemberExpression, MetaProperty},
  ast_visit::{walk, Visit},
};

/// Collects the exports a CommonJS module assigns, plus the signals that tell
/// CommonJS apart from a plain script.
#[derive(Default)]
pub struct CommonJsScanner {
  pub export_names: FxIndexSet<ExportName>,
  pub uses_commonjs: bool,
  pub has_import_meta: bool,
}

impl CommonJsScanner {
  fn add(&mut self, name: &str) {
    self.export_names.insert(ExportName::from(name));
  }
}

/// `exports` or `module.exports`.
fn is_exports_object(expr: &Expression) -> bool {
  match expr {
    Expression::Identifier(ident) => ident.name == "exports",
    Expression::StaticMemberExpression(member) => is_module_exports(&member.object, &member.property.name),
    _ => false,
  }
}

fn is_module_exports(object: &Expression, property: &str) -> bool {
  matches!(object, Expression::Identifier(ident) if ident.name == "module") && property == "exports"
}

impl<'a> Visit<'a> for CommonJsScanner {
  fn visit_assignment_expression(&mut self, expr: &AssignmentExpression<'a>) {
    if let Some(member) = expr.left.as_member_expression() {
      self.scan_export_assignment(member);
    }
    walk::walk_assignment_expression(self, expr);
  }

  fn visit_call_expression(&mut self, expr: &CallExpression<'a>) {
    match &expr.callee {
      // require('...')
      Expression::Identifier(ident) if ident.name == "require" => {
        self.uses_commonjs = true;
      }
      // Object.defineProperty(exports, 'name', { ... })
      Expression::StaticMemberExpression(member)
        if member.property.name == "defineProperty"
          && matches!(&member.object, Expression::Identifier(ident) if ident.name == "Object") =>
      {
        if let [Argument::Identifier(target), Argument::StringLiteral(name), ..] =
          expr.arguments.as_slice()
        {
          if target.name == "exports" {
            self.uses_commonjs = true;
            self.add(name.value.as_str());
          }
        }
      }
      _ => {}
    }
    walk::walk_call_expression(self, expr);
  }

  fn visit_meta_property(&mut self, it: &MetaProperty<'a>) {
    if it.meta.name == "import" && it.property.name == "meta" {
      self.has_import_meta = true;
    }
  }
}

impl CommonJsScanner {
  fn scan_export_assignment(&mut self, member: &MemberExpression) {
    let Some(property) = member.static_property_name() else {
      if is_exports_object(member.object()) {
        // exports[name] = ...
        self.uses_commonjs = true;
      }
      return;
    };

    if is_module_exports(member.object(), property) {
      // module.exports = ...
      self.uses_commonjs = true;
      self.add(ExportName::DEFAULT);
    } else if is_exports_object(member.object()) {
      // exports.name = ... / module.exports.name = ...
      self.uses_commonjs = true;
      self.add(property);
    }
  }
}
