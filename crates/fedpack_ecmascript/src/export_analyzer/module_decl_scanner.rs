use fedpack_common::ExportName;
use fedpack_utils::indexmap::FxIndexSet;
use oxc::ast::ast::{Declaration, ExportDefaultDeclarationKind, Program, Statement};

/// Collects ESM export names from the top-level module declarations.
#[derive(Default)]
pub struct ModuleDeclScanner {
  pub export_names: FxIndexSet<ExportName>,
  pub has_module_syntax: bool,
  pub has_star_reexport: bool,
}

impl ModuleDeclScanner {
  pub fn scan(&mut self, program: &Program) {
    for stmt in &program.body {
      match stmt {
        Statement::ImportDeclaration(_) => {
          self.has_module_syntax = true;
        }
        Statement::ExportDefaultDeclaration(decl) => {
          self.has_module_syntax = true;
          if !matches!(decl.declaration, ExportDefaultDeclarationKind::TSInterfaceDeclaration(_)) {
            self.add(ExportName::DEFAULT);
          }
        }
        Statement::ExportAllDeclaration(decl) => {
          self.has_module_syntax = true;
          if decl.export_kind.is_type() {
            continue;
          }
          match &decl.exported {
            // export * as ns from '...'
            Some(exported) => self.add(exported.name().as_str()),
            // export * from '...'
            None => self.has_star_reexport = true,
          }
        }
        Statement::ExportNamedDeclaration(decl) => {
          self.has_module_syntax = true;
          if decl.export_kind.is_type() {
            continue;
          }
          if let Some(declaration) = &decl.declaration {
            self.scan_declaration(declaration);
          }
          for specifier in &decl.specifiers {
            if !specifier.export_kind.is_type() {
              self.add(specifier.exported.name().as_str());
            }
          }
        }
        _ => {}
      }
    }
  }

  fn scan_declaration(&mut self, declaration: &Declaration) {
    match declaration {
      Declaration::VariableDeclaration(decl) if !decl.declare => {
        for declarator in &decl.declarations {
          for ident in declarator.id.get_binding_identifiers() {
            self.add(ident.name.as_str());
          }
        }
      }
      Declaration::FunctionDeclaration(func) if !func.declare => {
        if let Some(id) = &func.id {
          self.add(id.name.as_str());
        }
      }
      Declaration::ClassDeclaration(class) if !class.declare => {
        if let Some(id) = &class.id {
          self.add(id.name.as_str());
        }
      }
      Declaration::TSEnumDeclaration(decl) if !decl.declare => {
        self.add(decl.id.name.as_str());
      }
      // Type aliases, interfaces, ambient and namespace declarations.
      _ => {}
    }
  }

  fn add(&mut self, name: &str) {
    self.export_names.insert(ExportName::from(name));
  }
}
