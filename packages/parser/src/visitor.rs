use crate::id_generator::IdGenerator;
use crate::model::{Block, Column, Section, Template};

/// Visitor pattern for traversing the template tree immutably.
///
/// Default implementations walk the entire tree; override specific `visit_*`
/// methods to act on nodes.
pub trait Visitor: Sized {
    fn visit_template(&mut self, template: &Template) {
        walk_template(self, template);
    }

    fn visit_section(&mut self, section: &Section) {
        walk_section(self, section);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }

    fn visit_block(&mut self, _block: &Block) {
        // Leaf node, no children to walk
    }
}

pub fn walk_template<V: Visitor>(visitor: &mut V, template: &Template) {
    for section in &template.sections {
        visitor.visit_section(section);
    }
}

pub fn walk_section<V: Visitor>(visitor: &mut V, section: &Section) {
    for column in &section.columns {
        visitor.visit_column(column);
    }
}

pub fn walk_column<V: Visitor>(visitor: &mut V, column: &Column) {
    for block in &column.blocks {
        visitor.visit_block(block);
    }
}

/// Mutable visitor for transforming the template tree in place.
pub trait VisitorMut: Sized {
    fn visit_template_mut(&mut self, template: &mut Template) {
        walk_template_mut(self, template);
    }

    fn visit_section_mut(&mut self, section: &mut Section) {
        walk_section_mut(self, section);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        walk_column_mut(self, column);
    }

    fn visit_block_mut(&mut self, _block: &mut Block) {
        // Leaf node, no children to walk
    }
}

pub fn walk_template_mut<V: VisitorMut>(visitor: &mut V, template: &mut Template) {
    for section in &mut template.sections {
        visitor.visit_section_mut(section);
    }
}

pub fn walk_section_mut<V: VisitorMut>(visitor: &mut V, section: &mut Section) {
    for column in &mut section.columns {
        visitor.visit_column_mut(column);
    }
}

pub fn walk_column_mut<V: VisitorMut>(visitor: &mut V, column: &mut Column) {
    for block in &mut column.blocks {
        visitor.visit_block_mut(block);
    }
}

/// Assign fresh ids to a section and everything under it. Used by the
/// duplicate operations so copies never share ids with their originals.
pub fn regenerate_ids_section(section: &mut Section, ids: &mut IdGenerator) {
    let mut reid = Reid { ids };
    reid.visit_section_mut(section);
}

struct Reid<'a> {
    ids: &'a mut IdGenerator,
}

impl VisitorMut for Reid<'_> {
    fn visit_section_mut(&mut self, section: &mut Section) {
        section.id = self.ids.next_section_id();
        walk_section_mut(self, section);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        column.id = self.ids.next_column_id();
        walk_column_mut(self, column);
    }

    fn visit_block_mut(&mut self, block: &mut Block) {
        block.id = self.ids.next_block_id();
    }
}
