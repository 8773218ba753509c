/*! Test coverage for core IR operations.
 *
 * The lowering layer leans on a small set of builder guarantees: typed temps,
 * identity conversions, single terminators, and block splitting. These tests
 * pin those guarantees down.
 */

mod module_tests;
