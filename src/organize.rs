//! Grouping of records into the two-level category tree.

use crate::model::{CategoryDeclaration, CategoryTree, DocumentRecord, ShapeConflict, OTHER_CATEGORY};

/// Build a [`CategoryTree`] from scanned records.
///
/// Uncategorized records go to [`OTHER_CATEGORY`]. A record is placed once
/// per declaration (and once per subcategory of a nested declaration); no
/// deduplication is performed.
///
/// The first declaration seen for a category fixes whether it is flat or
/// nested. A later declaration of the other form is dropped and reported in
/// [`CategoryTree::conflicts`]. [`OTHER_CATEGORY`] is always flat, so nested
/// declarations of it are reported the same way.
pub fn organize(records: &[DocumentRecord]) -> CategoryTree {
    let mut tree = CategoryTree::new();

    for record in records {
        if record.is_uncategorized() {
            // `Other` never becomes nested, so this cannot fail.
            tree.push_flat(OTHER_CATEGORY, record);
            continue;
        }

        for declaration in &record.categories {
            if !place(&mut tree, declaration, record) {
                let conflict = ShapeConflict {
                    category: declaration.main().to_string(),
                    file: record.file.clone(),
                    existing_nested: !declaration.is_nested(),
                };
                log::warn!(
                    "{}: category {:?} is already {}, ignoring this declaration",
                    conflict.file,
                    conflict.category,
                    if conflict.existing_nested { "nested" } else { "flat" }
                );
                tree.add_conflict(conflict);
            }
        }
    }

    tree
}

/// Place one declaration. Returns `false` on a shape conflict.
fn place(
    tree: &mut CategoryTree,
    declaration: &CategoryDeclaration,
    record: &DocumentRecord,
) -> bool {
    let main = declaration.main();
    if !declaration.is_nested() {
        return tree.push_flat(main, record);
    }
    if main == OTHER_CATEGORY || !tree.ensure_nested(main) {
        return false;
    }
    for sub in declaration.subcategories() {
        tree.push_nested(main, sub, record);
    }
    true
}
