/*! Built-in statement sequences the driver can lower.
 *
 * Each demo registers a synthetic source file, feeds a handful of statement
 * nodes through the lowering operations, and returns the finished module.
 * The termination demos leave dead statements after STOP so the output shows
 * the block split a never-returning call forces.
 */

use anyhow::Result;
use fortir_core::builder::FunctionBuilder;
use fortir_core::module::Module;
use fortir_core::source_location::{SourceFiles, SourceSpan};
use fortir_core::types::Type;
use fortir_lower::{
    lower_pause, lower_pointer_associated, lower_random_init, lower_random_number,
    lower_random_seed, lower_stop, LoweringContext, PauseStmt, RandomSeedArgs, StopKind, StopStmt,
    TypedExpr,
};

pub struct Demo {
    pub name: &'static str,
    pub summary: &'static str,
    pub build: fn() -> Result<Module>,
}

pub const ALL: &[Demo] = &[
    Demo {
        name: "stop",
        summary: "STOP with a numeric code, followed by a dead statement",
        build: stop_demo,
    },
    Demo {
        name: "error-stop",
        summary: "ERROR STOP with a character code and QUIET",
        build: error_stop_demo,
    },
    Demo {
        name: "pause",
        summary: "legacy PAUSE prompt",
        build: pause_demo,
    },
    Demo {
        name: "associated",
        summary: "pointer association query returned from a function",
        build: associated_demo,
    },
    Demo {
        name: "random",
        summary: "RANDOM_INIT, RANDOM_NUMBER, and RANDOM_SEED with call-site tracking",
        build: random_demo,
    },
];

pub fn find(name: &str) -> Option<&'static Demo> {
    ALL.iter().find(|demo| demo.name == name)
}

fn demo_module(name: &str, file: &str, text: &str) -> Result<(Module, LoweringContext, u32)> {
    let files = SourceFiles::new();
    let file_id = files.add_file(file.into(), text.to_string())?;

    let mut module = Module::new(name);
    module.source_files = files.clone();
    module.metadata.source_file = Some(file.to_string());

    Ok((module, LoweringContext::new(files), file_id))
}

fn stop_demo() -> Result<Module> {
    let (mut module, mut ctx, file_id) = demo_module(
        "stop_demo",
        "stop_demo.f90",
        "program stop_demo\n  stop 42\n  pause\nend program stop_demo\n",
    )?;

    let mut builder = FunctionBuilder::new(&mut module, "main");

    let stop = StopStmt::new(StopKind::Stop, SourceSpan::new(file_id, 20, 7))
        .with_code(TypedExpr::Int(42));
    lower_stop(&mut ctx, &mut builder, &stop)?;

    let pause = PauseStmt::new(SourceSpan::new(file_id, 30, 5));
    lower_pause(&mut ctx, &mut builder, &pause)?;
    builder.return_void()?;
    builder.build()?;

    Ok(module)
}

fn error_stop_demo() -> Result<Module> {
    let (mut module, mut ctx, file_id) = demo_module(
        "error_demo",
        "error_demo.f90",
        "program error_demo\n  error stop \"meltdown\", quiet=.false.\nend program error_demo\n",
    )?;

    let mut builder = FunctionBuilder::new(&mut module, "main");

    let stop = StopStmt::new(StopKind::ErrorStop, SourceSpan::new(file_id, 21, 36))
        .with_code(TypedExpr::Char("meltdown".to_string()))
        .with_quiet(TypedExpr::Logical(false));
    lower_stop(&mut ctx, &mut builder, &stop)?;
    builder.return_void()?;
    builder.build()?;

    Ok(module)
}

fn pause_demo() -> Result<Module> {
    let (mut module, mut ctx, file_id) = demo_module(
        "pause_demo",
        "pause_demo.f90",
        "program pause_demo\n  pause\nend program pause_demo\n",
    )?;

    let mut builder = FunctionBuilder::new(&mut module, "main");

    lower_pause(
        &mut ctx,
        &mut builder,
        &PauseStmt::new(SourceSpan::new(file_id, 21, 5)),
    )?;
    builder.return_void()?;
    builder.build()?;

    Ok(module)
}

fn associated_demo() -> Result<Module> {
    let (mut module, mut ctx, file_id) = demo_module(
        "assoc_demo",
        "assoc_demo.f90",
        "logical function is_linked(ptr, target)\n  is_linked = associated(ptr, target)\nend function is_linked\n",
    )?;

    let mut builder = FunctionBuilder::new(&mut module, "is_linked");
    builder.param("ptr", Type::Descriptor);
    builder.param("target", Type::Descriptor);
    builder.returns(Type::Logical);

    ctx.set_span(SourceSpan::new(file_id, 42, 35));
    let pointer = builder.get_param(0);
    let target = builder.get_param(1);
    let result = lower_pointer_associated(&mut ctx, &mut builder, pointer, target)?;
    builder.return_value(result)?;
    builder.build()?;

    Ok(module)
}

fn random_demo() -> Result<Module> {
    let (mut module, mut ctx, file_id) = demo_module(
        "random_demo",
        "random_demo.f90",
        "subroutine shuffle(harvest, seed)\n  call random_init(.true., .false.)\n  call random_number(harvest)\n  call random_seed(size=seed)\nend subroutine shuffle\n",
    )?;

    let mut builder = FunctionBuilder::new(&mut module, "shuffle");
    builder.param("harvest", Type::Descriptor);
    builder.param("seed", Type::Descriptor);

    ctx.set_span(SourceSpan::new(file_id, 36, 33));
    let repeatable = builder.logical_constant(true);
    let image_distinct = builder.logical_constant(false);
    lower_random_init(&mut ctx, &mut builder, repeatable, image_distinct)?;

    ctx.set_span(SourceSpan::new(file_id, 72, 27));
    let harvest = builder.get_param(0);
    lower_random_number(&mut ctx, &mut builder, harvest)?;

    ctx.set_span(SourceSpan::new(file_id, 102, 27));
    let seed_args = RandomSeedArgs {
        size: Some(builder.get_param(1)),
        ..Default::default()
    };
    lower_random_seed(&mut ctx, &mut builder, &seed_args)?;

    builder.return_void()?;
    builder.build()?;

    Ok(module)
}
